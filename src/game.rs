//! A single game of Tic-Tac-Toe between a human and either another human or the AI.
//!
//! [`GameSession`] owns everything that lives for one game: the board, whose turn it
//! is, and whether the AI has already made its randomized opening move. After every
//! accepted move the outcome is recomputed from the board, and in single-player mode
//! the AI answers before `play` returns.

use crate::board::GameOutcome;
use crate::boards::tic_tac_toe::{Mark, TicTacToeBoard};
use crate::error::MoveError;
use crate::minimax::MinimaxSearch;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who sits on the other side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// The human plays against the AI.
    #[default]
    SinglePlayer,
    /// Two humans share the board.
    Multiplayer,
}

/// Settings chosen before a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    /// The mark of the (first) human player.
    pub human_mark: Mark,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::SinglePlayer,
            human_mark: Mark::X,
        }
    }
}

impl GameConfig {
    pub fn new(mode: GameMode, human_mark: Mark) -> Self {
        Self { mode, human_mark }
    }

    /// The mark the AI plays, if there is an AI in this game.
    pub fn ai_mark(&self) -> Option<Mark> {
        match self.mode {
            GameMode::SinglePlayer => Some(self.human_mark.opponent()),
            GameMode::Multiplayer => None,
        }
    }

    /// The mark that moves first.
    ///
    /// Against the AI, X always opens, so the AI starts when the human picked O.
    /// Between two humans the chosen mark starts.
    pub fn starting_mark(&self) -> Mark {
        match self.mode {
            GameMode::SinglePlayer => Mark::X,
            GameMode::Multiplayer => self.human_mark,
        }
    }
}

/// State of one game, from the first move until a reset.
#[derive(Debug)]
pub struct GameSession<K: RandomGenerator = StandardRandomGenerator> {
    config: GameConfig,
    board: TicTacToeBoard,
    next_mark: Mark,
    first_ai_move: bool,
    search: MinimaxSearch<K>,
}

impl GameSession<StandardRandomGenerator> {
    /// Starts a game using the thread-local random generator for the AI's opening.
    pub fn new(config: GameConfig) -> Self {
        Self::with_random_generator(config, StandardRandomGenerator)
    }
}

impl<K: RandomGenerator> GameSession<K> {
    /// Starts a game. If the AI moves first, its opening move is already on the board.
    #[instrument(skip(rg))]
    pub fn with_random_generator(config: GameConfig, rg: K) -> Self {
        let mut session = Self {
            config,
            board: TicTacToeBoard::new(),
            next_mark: config.starting_mark(),
            first_ai_move: true,
            search: MinimaxSearch::builder().with_random_generator(rg).build(),
        };
        session.play_ai_turn();
        session
    }

    /// Clears the board and starts over with the same settings.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = TicTacToeBoard::new();
        self.next_mark = self.config.starting_mark();
        self.first_ai_move = true;
        debug!("Game reset");
        self.play_ai_turn();
    }

    /// Starts a new game with different settings.
    pub fn reconfigure(&mut self, config: GameConfig) {
        self.config = config;
        self.reset();
    }

    /// Places the mark of the side to move at `index`.
    ///
    /// In single-player mode the AI replies before this returns, so the returned outcome
    /// already includes its move.
    ///
    /// # Errors
    ///
    /// Rejected moves change nothing. See [`TicTacToeBoard::apply_move`] for the board
    /// checks; additionally [`MoveError::NotYourTurn`] is returned if the AI is to move.
    #[instrument(skip(self), fields(mark = %self.next_mark))]
    pub fn play(&mut self, index: u8) -> Result<GameOutcome<Mark>, MoveError> {
        if self.config.ai_mark() == Some(self.next_mark) && !self.outcome().is_terminal() {
            debug!("Rejected move while the AI is to move");
            return Err(MoveError::NotYourTurn(self.next_mark));
        }

        self.place(index, self.next_mark)?;
        self.play_ai_turn();
        Ok(self.outcome())
    }

    /// Best move for the side to move, ignoring the random opening.
    pub fn hint(&self) -> Option<u8> {
        if self.outcome().is_terminal() {
            return None;
        }
        let mut best: Option<(u8, i32)> = None;
        for scored in MinimaxSearch::<K>::evaluate_moves(&self.board, self.next_mark) {
            if best.is_none_or(|(_, score)| scored.score > score) {
                best = Some((scored.prev_move, scored.score));
            }
        }
        best.map(|(index, _)| index)
    }

    pub fn board(&self) -> &TicTacToeBoard {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn outcome(&self) -> GameOutcome<Mark> {
        self.board.get_outcome()
    }

    /// The mark that moves next.
    pub fn next_mark(&self) -> Mark {
        self.next_mark
    }

    /// Whether the AI's randomized opening is still to come.
    pub fn first_ai_move(&self) -> bool {
        self.first_ai_move
    }

    /// `true` while a human may click: the game is running and the AI is not to move.
    pub fn is_human_turn(&self) -> bool {
        !self.outcome().is_terminal() && self.config.ai_mark() != Some(self.next_mark)
    }

    /// The headline a presentation layer shows above the board.
    pub fn title(&self) -> String {
        match self.outcome() {
            GameOutcome::InProgress => "Tic-Tac-Toe Game".to_string(),
            GameOutcome::Won(mark) => format!("{mark} Wins!"),
            GameOutcome::Draw => "It's a tie!".to_string(),
        }
    }

    fn place(&mut self, index: u8, mark: Mark) -> Result<(), MoveError> {
        self.board = self.board.apply_move(index, mark)?;
        self.next_mark = mark.opponent();

        let outcome = self.outcome();
        if outcome.is_terminal() {
            info!(%outcome, "Game over");
        }
        Ok(())
    }

    fn play_ai_turn(&mut self) {
        let Some(ai_mark) = self.config.ai_mark() else {
            return;
        };
        if self.next_mark != ai_mark || self.outcome().is_terminal() {
            return;
        }

        let Some(index) = self
            .search
            .choose_move(&self.board, ai_mark, self.first_ai_move)
        else {
            warn!("AI found no move on a running game");
            return;
        };

        match self.place(index, ai_mark) {
            Ok(()) => self.first_ai_move = false,
            Err(err) => warn!(%err, index, "AI move was rejected"),
        }
    }
}
