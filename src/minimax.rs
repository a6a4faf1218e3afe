use crate::board::Board;
use crate::random::RandomGenerator;
use crate::scored_move::ScoredMove;
use std::fmt::Debug;
use tracing::{debug, instrument, trace};

/// Base score of a won position. Each ply needed to reach it costs one point.
pub const WIN_SCORE: i32 = 10;

/// Exhaustive minimax search that picks a move for one side of a [`Board`].
///
/// The search itself is stateless; the only thing it carries between calls is the
/// random generator used for opening moves.
#[derive(Debug, Default)]
pub struct MinimaxSearch<K: RandomGenerator> {
    random: K,
}

/// A builder for creating instances of `MinimaxSearch`.
pub struct MinimaxSearchBuilder<K: RandomGenerator> {
    random_generator: K,
}

impl<K: RandomGenerator> MinimaxSearchBuilder<K> {
    pub fn new() -> Self {
        Self {
            random_generator: K::default(),
        }
    }

    /// Sets the random number generator used for opening moves.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    pub fn build(self) -> MinimaxSearch<K> {
        MinimaxSearch::new(self.random_generator)
    }
}

impl<K: RandomGenerator> Default for MinimaxSearchBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RandomGenerator> MinimaxSearch<K> {
    /// Returns a new builder for `MinimaxSearch`.
    pub fn builder() -> MinimaxSearchBuilder<K> {
        MinimaxSearchBuilder::new()
    }

    pub fn new(rg: K) -> Self {
        Self { random: rg }
    }

    /// Picks a move for `ai_player`.
    ///
    /// When `first_move` is set the move is drawn uniformly from the available ones, so
    /// that games do not all open the same way. Otherwise every available move is scored
    /// with [`minimax`] and the highest score wins; on equal scores the move listed first
    /// by [`Board::get_available_moves`] is kept.
    ///
    /// Returns `None` when there is nothing left to play.
    #[instrument(skip(self, board))]
    pub fn choose_move<T>(
        &mut self,
        board: &T,
        ai_player: T::Player,
        first_move: bool,
    ) -> Option<T::Move>
    where
        T: Board,
        T::Move: Debug,
        T::Player: Debug,
    {
        if first_move {
            let moves = board.get_available_moves();
            let chosen = self.random.get_random_from_slice(&moves).copied();
            debug!(?chosen, "Picked random opening move");
            return chosen;
        }

        let mut best: Option<ScoredMove<T::Move>> = None;
        for candidate in Self::evaluate_moves(board, ai_player) {
            if best.is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        let chosen = best.map(|b| b.prev_move);
        debug!(?chosen, score = best.map(|b| b.score), "Picked minimax move");
        chosen
    }

    /// Scores every available move for `ai_player`, in the order the board lists them.
    pub fn evaluate_moves<T>(board: &T, ai_player: T::Player) -> Vec<ScoredMove<T::Move>>
    where
        T: Board,
        T::Move: Debug,
    {
        board
            .get_available_moves()
            .into_iter()
            .filter_map(|b_move| {
                let child = board.with_move(&b_move, ai_player)?;
                let score = minimax(&child, 0, false, ai_player);
                trace!(?b_move, score, "Scored root move");
                Some(ScoredMove::new(b_move, score))
            })
            .collect()
    }
}

/// Scores `board` from the point of view of `ai_player`.
///
/// `maximizing` tells whose turn it is on `board`: `ai_player` when set, the opponent
/// otherwise. A win is worth `WIN_SCORE - depth` and a loss `depth - WIN_SCORE`, so
/// quicker wins and slower losses are preferred. A full board without a winner is `0`.
///
/// The whole remaining game tree is visited, without pruning.
pub fn minimax<T: Board>(board: &T, depth: i32, maximizing: bool, ai_player: T::Player) -> i32 {
    match board.get_winner() {
        Some(winner) if winner == ai_player => return WIN_SCORE - depth,
        Some(_) => return depth - WIN_SCORE,
        None if board.is_full() => return 0,
        None => {}
    }

    let player = if maximizing {
        ai_player
    } else {
        T::get_opponent(ai_player)
    };

    let scores = board
        .get_available_moves()
        .into_iter()
        .filter_map(|b_move| board.with_move(&b_move, player))
        .map(|child| minimax(&child, depth + 1, !maximizing, ai_player));

    let best = if maximizing { scores.max() } else { scores.min() };
    best.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameOutcome;
    use crate::boards::tic_tac_toe::{Mark, TicTacToeBoard};
    use crate::random::SeededRandomGenerator;

    fn board(s: &str) -> TicTacToeBoard {
        s.parse().unwrap()
    }

    fn seeded_search() -> MinimaxSearch<SeededRandomGenerator> {
        MinimaxSearch::builder()
            .with_random_generator(SeededRandomGenerator::new(7))
            .build()
    }

    #[test]
    fn takes_immediate_win_over_block() {
        // arrange
        let b = board("XX. OO. ...");
        let mut search = seeded_search();

        // act
        let chosen = search.choose_move(&b, Mark::O, false);

        // assert
        assert_eq!(chosen, Some(5));
    }

    #[test]
    fn blocks_immediate_threat() {
        // X still forks after the block, but the loss comes later
        let b = board("XX. O.. ...");
        let mut search = seeded_search();

        let chosen = search.choose_move(&b, Mark::O, false);

        assert_eq!(chosen, Some(2));
        let scores = MinimaxSearch::<SeededRandomGenerator>::evaluate_moves(&b, Mark::O);
        let block = scores.iter().find(|s| s.prev_move == 2).unwrap();
        assert_eq!(block.score, -7);
        assert!(scores.iter().filter(|s| s.prev_move != 2).all(|s| s.score == -9));
    }

    #[test]
    fn prefers_the_fastest_of_several_wins() {
        // X wins at once on 2, or two plies later after blocking on 8
        let b = board("XX. X.. OO.");
        let scores = MinimaxSearch::<SeededRandomGenerator>::evaluate_moves(&b, Mark::X);
        let by_move: Vec<(u8, i32)> = scores.iter().map(|s| (s.prev_move, s.score)).collect();
        assert_eq!(by_move, vec![(2, 10), (4, -9), (5, -9), (8, 8)]);

        let mut search = seeded_search();
        assert_eq!(search.choose_move(&b, Mark::X, false), Some(2));
    }

    #[test]
    fn equal_scores_keep_lowest_index() {
        // every reply on an empty board draws, so cell 0 is kept
        let mut search = seeded_search();
        let chosen = search.choose_move(&TicTacToeBoard::new(), Mark::X, false);
        assert_eq!(chosen, Some(0));
    }

    #[test]
    fn terminal_scores() {
        assert_eq!(minimax(&board("OOO XX. X.."), 0, true, Mark::O), 10);
        assert_eq!(minimax(&board("OOO XX. X.."), 3, true, Mark::O), 7);
        assert_eq!(minimax(&board("OOO XX. X.."), 3, false, Mark::X), -7);
        assert_eq!(minimax(&board("XOX XOO OXX"), 4, true, Mark::X), 0);
    }

    #[test]
    fn perfect_play_from_empty_board_is_a_draw() {
        // arrange
        let mut search = seeded_search();
        let mut b = TicTacToeBoard::new();
        let mut mark = Mark::X;

        // act
        while b.get_outcome() == GameOutcome::InProgress {
            let chosen = search.choose_move(&b, mark, false).unwrap();
            b = b.apply_move(chosen, mark).unwrap();
            mark = mark.opponent();
        }

        // assert
        assert_eq!(b.get_outcome(), GameOutcome::Draw);
    }

    #[test]
    fn no_move_on_full_board() {
        let mut search = seeded_search();
        let full = board("XOX XOO OXX");
        assert_eq!(search.choose_move(&full, Mark::X, false), None);
        assert_eq!(search.choose_move(&full, Mark::X, true), None);
    }

    #[test]
    fn first_move_is_uniform_over_empty_cells() {
        // arrange
        let mut search = seeded_search();
        let empty = TicTacToeBoard::new();
        let mut counts = [0u32; 9];

        // act
        for _ in 0..9000 {
            let chosen = search.choose_move(&empty, Mark::O, true).unwrap();
            counts[chosen as usize] += 1;
        }

        // assert
        for count in counts {
            assert!((800..=1200).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn first_move_only_picks_empty_cells() {
        let mut search = seeded_search();
        let b = board("XOX .O. X..");
        for _ in 0..200 {
            let chosen = search.choose_move(&b, Mark::O, true).unwrap();
            assert!([3, 5, 7, 8].contains(&chosen));
        }
    }
}
