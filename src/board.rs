use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The central trait of the library, defining the interface for a game state.
///
/// The minimax search only talks to a game through this trait.
/// Implementations are treated as values: `with_move` produces a new state
/// and leaves the receiver untouched, so the search never has to undo a move.
pub trait Board: Clone {
    /// The type representing a move in the game. For Tic-Tac-Toe this is the cell index.
    type Move: Copy;

    /// The type representing a side of the game.
    type Player: Copy + PartialEq;

    /// Returns the player who has completed a winning line, if any.
    fn get_winner(&self) -> Option<Self::Player>;

    /// Returns `true` if no move can be placed anymore.
    fn is_full(&self) -> bool;

    /// Returns a list of all legal moves available from the current state.
    fn get_available_moves(&self) -> Vec<Self::Move>;

    /// Returns the state after `player` performs `b_move`, or `None` if the move is illegal.
    fn with_move(&self, b_move: &Self::Move, player: Self::Player) -> Option<Self>;

    /// Returns the other side.
    fn get_opponent(player: Self::Player) -> Self::Player;

    /// Returns the current outcome of the game.
    ///
    /// A completed line takes precedence over a full board.
    fn get_outcome(&self) -> GameOutcome<Self::Player> {
        match self.get_winner() {
            Some(winner) => GameOutcome::Won(winner),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }
}

/// Represents the possible outcomes of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum GameOutcome<P> {
    /// The game is still ongoing.
    InProgress,
    /// The given player has completed a line.
    Won(P),
    /// The board is full and nobody has won.
    Draw,
}

impl<P> GameOutcome<P> {
    /// Returns `true` once the game has ended, either way.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

impl<P: Display> Display for GameOutcome<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "in progress"),
            GameOutcome::Won(player) => write!(f, "{player} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}
