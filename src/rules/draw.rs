//! Draw detection.

use super::win::find_winner;
use crate::board::Board;

/// True iff the board is full and no line is complete.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && find_winner(board).is_none()
}
