//! Engine error types.

use crate::types::Symbol;

/// Rejection reasons for a move request or CPU delivery.
///
/// Every variant is a normal, recoverable outcome of user interaction or
/// race timing; callers decide whether to re-prompt, ignore, or log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The coordinate lies outside the board.
    #[display("Cell index {} is outside the board", _0)]
    OutOfRange(usize),

    /// The target cell already holds a symbol.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// A move was submitted out of turn (e.g. while the CPU is thinking).
    #[display("It is {}'s turn", _0)]
    WrongPlayer(Symbol),

    /// The game has reached a terminal state.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// A CPU move arrived for a superseded game generation.
    #[display("Move belongs to a superseded game")]
    StaleDelivery,
}

impl std::error::Error for MoveError {}
