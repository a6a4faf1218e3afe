//! Rejection reasons for board and session operations.
//!
//! None of these are fatal: a rejected move leaves every piece of state as it was,
//! and a presentation layer is expected to simply ignore the click that caused it.

use crate::boards::tic_tac_toe::Mark;

/// Error returned when a move cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index does not name one of the nine cells.
    #[display("Cell index {_0} is outside of 0..=8")]
    OutOfRange(u8),

    /// The target cell already holds a mark.
    #[display("Cell {_0} is already taken")]
    CellTaken(u8),

    /// A line has already been completed.
    #[display("Game is already over")]
    GameOver,

    /// The side that tried to move is not the side to move.
    #[display("It's not {_0}'s turn")]
    NotYourTurn(Mark),
}

impl std::error::Error for MoveError {}

/// Error returned when a board cannot be parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// The text did not contain exactly nine cells.
    #[display("Expected 9 cells, found {_0}")]
    WrongLength(usize),

    /// A character is neither a mark nor an empty-cell placeholder.
    #[display("Unexpected cell character {_0:?}")]
    InvalidCell(char),
}

impl std::error::Error for ParseBoardError {}
