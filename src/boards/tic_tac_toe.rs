use crate::board::{Board, GameOutcome};
use crate::error::{MoveError, ParseBoardError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The 8 winning triples: rows, then columns, then diagonals.
///
/// `get_winner` reports the first complete line in this order.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player symbol.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the other symbol.
    pub const fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// The content of a single cell.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn mark(&self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(*mark),
        }
    }
}

/// An implementation of the `Board` trait for the game of Tic-Tac-Toe.
///
/// The board is represented by a 9-element array laid out row-major, so the cell at
/// `row`, `col` lives at index `row * 3 + col`. A move is represented by a `u8` from 0 to 8.
///
/// Boards are values: `apply_move` returns a new board and never touches the old one.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct TicTacToeBoard {
    field: [Cell; CELL_COUNT],
}

impl TicTacToeBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from raw cells. No legality of the position is implied.
    pub const fn from_cells(field: [Cell; CELL_COUNT]) -> Self {
        Self { field }
    }

    /// Returns all nine cells in index order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.field
    }

    /// Returns the cell at `index`, or `None` when the index is off the board.
    pub fn get(&self, index: u8) -> Option<Cell> {
        self.field.get(index as usize).copied()
    }

    /// Returns how many cells carry `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.field
            .iter()
            .filter(|cell| **cell == Cell::Marked(mark))
            .count()
    }

    /// Returns the board with `mark` placed at `index`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfRange`] if `index` is greater than 8.
    /// - [`MoveError::GameOver`] if a line is already complete.
    /// - [`MoveError::CellTaken`] if the cell is not empty.
    pub fn apply_move(&self, index: u8, mark: Mark) -> Result<Self, MoveError> {
        let Some(cell) = self.get(index) else {
            debug!(index, "Rejected move outside of the board");
            return Err(MoveError::OutOfRange(index));
        };
        if self.get_winner().is_some() {
            debug!(index, "Rejected move on a finished board");
            return Err(MoveError::GameOver);
        }
        if !cell.is_empty() {
            debug!(index, "Rejected move on a taken cell");
            return Err(MoveError::CellTaken(index));
        }

        let mut next = *self;
        next.field[index as usize] = Cell::Marked(mark);
        Ok(next)
    }

    /// Returns the mark of the first complete line, if any.
    pub fn get_winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.field[a].mark()?;
            (self.field[b] == self.field[a] && self.field[c] == self.field[a]).then_some(mark)
        })
    }

    /// Returns `true` if no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.field.iter().all(|cell| !cell.is_empty())
    }

    /// Returns `true` if the board is full and no line is complete.
    pub fn is_draw(&self) -> bool {
        self.get_winner().is_none() && self.is_full()
    }

    /// Returns the indices of the empty cells in ascending order.
    ///
    /// A board with a complete line has no moves left.
    pub fn get_available_moves(&self) -> Vec<u8> {
        if self.get_winner().is_some() {
            return Vec::new();
        }

        self.field
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| i as u8)
            .collect()
    }

    pub fn get_outcome(&self) -> GameOutcome<Mark> {
        Board::get_outcome(self)
    }
}

impl Board for TicTacToeBoard {
    type Move = u8;
    type Player = Mark;

    fn get_winner(&self) -> Option<Mark> {
        TicTacToeBoard::get_winner(self)
    }

    fn is_full(&self) -> bool {
        TicTacToeBoard::is_full(self)
    }

    fn get_available_moves(&self) -> Vec<u8> {
        TicTacToeBoard::get_available_moves(self)
    }

    fn with_move(&self, b_move: &u8, player: Mark) -> Option<Self> {
        self.apply_move(*b_move, player).ok()
    }

    fn get_opponent(player: Mark) -> Mark {
        player.opponent()
    }
}

impl Display for TicTacToeBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.field.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "-+-+-")?;
            }
            let symbols: Vec<String> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Marked(mark) => mark.to_string(),
                })
                .collect();
            writeln!(f, "{}", symbols.join("|"))?;
        }
        Ok(())
    }
}

impl FromStr for TicTacToeBoard {
    type Err = ParseBoardError;

    /// Parses nine cells written as `X`, `O` and `.`, `_` or `-` for empty cells.
    /// Whitespace is ignored, so rows may be split across lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'X' | 'x' => Ok(Cell::Marked(Mark::X)),
                'O' | 'o' => Ok(Cell::Marked(Mark::O)),
                '.' | '_' | '-' => Ok(Cell::Empty),
                other => Err(ParseBoardError::InvalidCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let field: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|cells: Vec<Cell>| ParseBoardError::WrongLength(cells.len()))?;
        Ok(Self { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> TicTacToeBoard {
        s.parse().unwrap()
    }

    #[test]
    fn apply_move_sets_only_the_target_cell() {
        // arrange
        let before = board("X.. .O. ...");

        // act
        let after = before.apply_move(8, Mark::X).unwrap();

        // assert
        assert_eq!(after.get(8), Some(Cell::Marked(Mark::X)));
        for i in 0..8 {
            assert_eq!(after.get(i), before.get(i));
        }
        assert_eq!(before.get(8), Some(Cell::Empty));
    }

    #[test]
    fn apply_move_rejects_out_of_range_index() {
        let empty = TicTacToeBoard::new();
        assert_eq!(empty.apply_move(9, Mark::X), Err(MoveError::OutOfRange(9)));
        assert_eq!(empty.apply_move(255, Mark::O), Err(MoveError::OutOfRange(255)));
    }

    #[test]
    fn apply_move_rejects_taken_cell() {
        let b = board("X.. ... ...");
        assert_eq!(b.apply_move(0, Mark::O), Err(MoveError::CellTaken(0)));
        assert_eq!(b.apply_move(0, Mark::X), Err(MoveError::CellTaken(0)));
    }

    #[test]
    fn apply_move_rejects_finished_board() {
        let won = board("XXX OO. ...");
        assert_eq!(won.apply_move(5, Mark::O), Err(MoveError::GameOver));
        assert_eq!(won, board("XXX OO. ..."));
    }

    #[test]
    fn winner_on_row_column_and_diagonal() {
        assert_eq!(board("... OOO XX.").get_winner(), Some(Mark::O));
        assert_eq!(board(".X. OXO .X.").get_winner(), Some(Mark::X));
        assert_eq!(board("..O .O. OXX").get_winner(), Some(Mark::O));
        assert_eq!(board("XO. OX. ...").get_winner(), None);
    }

    #[test]
    fn winner_reports_first_line_in_declaration_order() {
        // both a row and a column are complete; rows are scanned first
        let b = board("OOO O.. O..");
        assert_eq!(b.get_winner(), Some(Mark::O));
        let b = board("XO. XO. XO.");
        assert_eq!(b.get_winner(), Some(Mark::X));
    }

    #[test]
    fn full_board_with_winner_is_not_a_draw() {
        let b = board("XOX OXO XOX");
        assert!(b.is_full());
        assert_eq!(b.get_winner(), Some(Mark::X));
        assert!(!b.is_draw());
        assert_eq!(b.get_outcome(), GameOutcome::Won(Mark::X));
    }

    #[test]
    fn nine_alternating_moves_without_a_line_is_a_draw() {
        // arrange
        let moves = [
            (0, Mark::X),
            (1, Mark::O),
            (2, Mark::X),
            (4, Mark::O),
            (3, Mark::X),
            (5, Mark::O),
            (7, Mark::X),
            (6, Mark::O),
            (8, Mark::X),
        ];

        // act
        let mut b = TicTacToeBoard::new();
        for (index, mark) in moves {
            assert_eq!(b.get_outcome(), GameOutcome::InProgress);
            b = b.apply_move(index, mark).unwrap();
        }

        // assert
        assert!(b.is_draw());
        assert_eq!(b.get_winner(), None);
        assert_eq!(b.get_outcome(), GameOutcome::Draw);
        assert_eq!(b.count(Mark::X), 5);
        assert_eq!(b.count(Mark::O), 4);
    }

    #[test]
    fn available_moves_are_ascending_and_empty_after_a_win() {
        assert_eq!(board("X.O .X. O..").get_available_moves(), vec![1, 3, 5, 7, 8]);
        assert!(board("XXX OO. ...").get_available_moves().is_empty());
        assert!(board("XOX XOO OXX").get_available_moves().is_empty());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            "XO".parse::<TicTacToeBoard>(),
            Err(ParseBoardError::WrongLength(2))
        );
        assert_eq!(
            "XO?......".parse::<TicTacToeBoard>(),
            Err(ParseBoardError::InvalidCell('?'))
        );
    }

    #[test]
    fn display_renders_grid() {
        let rendered = board("XX. OO. ...").to_string();
        assert_eq!(rendered, "X|X|.\n-+-+-\nO|O|.\n-+-+-\n.|.|.\n");
    }

    #[test]
    fn board_snapshot_serializes() {
        let b = board("X.. ... ..O");
        let json = serde_json::to_string(&b).unwrap();
        let back: TicTacToeBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
        assert!(json.contains("Empty"));
    }
}
