use crate::minimax::WIN_SCORE;

/// A candidate move at the root of the search, together with its minimax score.
///
/// Scores are seen from the side the search plays for: `WIN_SCORE - depth` for a
/// forced win, `depth - WIN_SCORE` for a forced loss and `0` for a draw, where `depth`
/// counts the plies played after this move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove<M> {
    /// The move that was evaluated.
    pub prev_move: M,
    /// The minimax value of the position after the move.
    pub score: i32,
}

impl<M> ScoredMove<M> {
    pub fn new(prev_move: M, score: i32) -> Self {
        Self { prev_move, score }
    }

    /// The move forces a win.
    pub fn is_win(&self) -> bool {
        self.score > 0
    }

    /// The opponent can force a win after this move.
    pub fn is_loss(&self) -> bool {
        self.score < 0
    }

    /// Best play from both sides ends in a draw.
    pub fn is_draw(&self) -> bool {
        self.score == 0
    }

    /// Number of plies, this move included, until the forced result.
    ///
    /// Returns `None` for a draw, which always runs until the board is full.
    pub fn plies_to_end(&self) -> Option<i32> {
        match self.score {
            0 => None,
            s if s > 0 => Some(WIN_SCORE - s + 1),
            s => Some(WIN_SCORE + s + 1),
        }
    }
}
