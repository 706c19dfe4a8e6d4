//! Win detection over board lines.

use crate::board::{Board, Diagonal};
use crate::types::{Cell, Symbol};
use tracing::instrument;

/// Checks every row, column, and the two diagonals for a completed line.
///
/// Returns the symbol of the first winning line in scan order (rows, then
/// columns, then diagonals). A legal move sequence can produce at most one
/// winning symbol, so the scan order is observable only under constructed
/// board states.
#[instrument(skip(board))]
pub fn find_winner(board: &Board) -> Option<Symbol> {
    let size = board.size();

    for row in 0..size {
        if let Some(symbol) = line_winner(board.row(row)) {
            return Some(symbol);
        }
    }
    for col in 0..size {
        if let Some(symbol) = line_winner(board.column(col)) {
            return Some(symbol);
        }
    }
    line_winner(board.diagonal(Diagonal::Main))
        .or_else(|| line_winner(board.diagonal(Diagonal::Anti)))
}

/// A line wins iff every cell is occupied and matches the first.
fn line_winner(mut cells: impl Iterator<Item = Cell>) -> Option<Symbol> {
    let first = cells.next()?.occupant()?;
    cells
        .all(|cell| cell.occupant() == Some(first))
        .then_some(first)
}
