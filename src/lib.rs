//! A small Tic-Tac-Toe engine with a perfect-play opponent.
//!
//! The engine keeps the board, detects wins and draws, and picks the AI's moves with an
//! exhaustive minimax search. The AI's first move of every game is random, so that
//! games between the AI and a careful player don't all play out the same way.
//! Rendering and input handling are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use tictactoe_minimax::board::GameOutcome;
//! use tictactoe_minimax::boards::tic_tac_toe::{Mark, TicTacToeBoard};
//! use tictactoe_minimax::minimax::MinimaxSearch;
//! use tictactoe_minimax::random::SeededRandomGenerator;
//!
//! // X threatens the top row, O must answer
//! let board: TicTacToeBoard = "XX. O.. ...".parse().unwrap();
//!
//! let mut search = MinimaxSearch::builder()
//!     .with_random_generator(SeededRandomGenerator::default())
//!     .build();
//!
//! let best_move = search.choose_move(&board, Mark::O, false);
//! assert_eq!(best_move, Some(2));
//!
//! let board = board.apply_move(2, Mark::O).unwrap();
//! assert_eq!(board.get_outcome(), GameOutcome::InProgress);
//! ```
//!
//! For a whole game with turn handling, see [`game::GameSession`].

/// Contains the `Board` trait and the `GameOutcome` enum that define the interface for a game.
pub mod board;
/// Contains pre-made implementations of the `Board` trait.
pub mod boards;
/// Rejection reasons for moves and board parsing.
pub mod error;
/// Game sessions: turn order, game mode and the AI's replies.
pub mod game;
/// The minimax search that chooses the AI's moves.
pub mod minimax;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Contains the `ScoredMove` struct, a root move together with its minimax score.
pub mod scored_move;
