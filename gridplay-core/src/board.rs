//! 3x3 board model with row-major cell indices

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of cells on the board
pub const BOARD_SIZE: usize = 9;

/// Center cell index
pub const CENTER: usize = 4;

/// Corner cell indices
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Winning line indices: rows, columns, diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

// ============================================================================
// SIDES AND CELLS
// ============================================================================

/// One of the two players. Side A always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Board glyph for this side
    pub fn symbol(self) -> char {
        match self {
            Side::A => 'X',
            Side::B => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Content of a single cell. Serialized as `null` or the owning side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Side>", into = "Option<Side>")]
pub enum Cell {
    #[default]
    Empty,
    Taken(Side),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Taken(side) => Some(side),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Taken(side) => side.symbol(),
        }
    }
}

impl From<Option<Side>> for Cell {
    fn from(side: Option<Side>) -> Self {
        side.map_or(Cell::Empty, Cell::Taken)
    }
}

impl From<Cell> for Option<Side> {
    fn from(cell: Cell) -> Self {
        cell.side()
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Fixed 3x3 grid. Pure data: legality of a move sequence is enforced by
/// the turn coordinator, not here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// All-empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from raw cells without checking the alternation invariant
    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Parse a board from nine glyphs (`X`/`A`, `O`/`B`, `.`/`_`/`-`),
    /// whitespace ignored. Rejects boards not reachable by alternating play
    /// counts.
    pub fn parse(text: &str) -> Result<Self> {
        let glyphs: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if glyphs.len() != BOARD_SIZE {
            return Err(Error::InvalidBoard(format!(
                "expected {} cells, got {} in '{}'",
                BOARD_SIZE,
                glyphs.len(),
                text
            )));
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (index, glyph) in glyphs.into_iter().enumerate() {
            cells[index] = match glyph {
                'X' | 'x' | 'A' | 'a' => Cell::Taken(Side::A),
                'O' | 'o' | 'B' | 'b' => Cell::Taken(Side::B),
                '.' | '_' | '-' => Cell::Empty,
                other => {
                    return Err(Error::InvalidBoard(format!(
                        "invalid character '{}' at position {}",
                        other, index
                    )))
                }
            };
        }

        let board = Self { cells };
        if !board.has_valid_counts() {
            return Err(Error::InvalidBoard(format!(
                "invalid piece counts: A={}, B={} (must be equal or A ahead by 1)",
                board.count(Side::A),
                board.count(Side::B)
            )));
        }
        Ok(board)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Cell at index, `None` when out of range
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Indices of empty cells in ascending order
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..BOARD_SIZE).filter(|&i| self.cells[i].is_empty()).collect()
    }

    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Taken(side)).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Side A count equals side B count, or exceeds it by one
    pub fn has_valid_counts(&self) -> bool {
        let a = self.count(Side::A);
        let b = self.count(Side::B);
        a == b || a == b + 1
    }

    /// Side whose turn it is under strict alternation
    pub fn side_to_move(&self) -> Side {
        if self.count(Side::A) > self.count(Side::B) {
            Side::B
        } else {
            Side::A
        }
    }

    // ========================================================================
    // LINE ANALYSIS
    // ========================================================================

    /// First completed line and its owner, scanning in `WINNING_LINES` order
    pub fn winning_line(&self) -> Option<(Side, [usize; 3])> {
        WINNING_LINES.iter().find_map(|&line| {
            let side = self.cells[line[0]].side()?;
            line.iter()
                .all(|&i| self.cells[i] == Cell::Taken(side))
                .then_some((side, line))
        })
    }

    /// Empty cells that would complete a line for `side`
    pub fn immediate_wins(&self, side: Side) -> Vec<usize> {
        let mut wins: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| self.completing_cell(side, line))
            .collect();
        wins.sort_unstable();
        wins.dedup();
        wins
    }

    /// The single empty cell in `line` when the other two belong to `side`
    fn completing_cell(&self, side: Side, line: &[usize; 3]) -> Option<usize> {
        let mut owned = 0;
        let mut empty = None;

        for &idx in line {
            match self.cells[idx] {
                Cell::Empty => {
                    if empty.is_some() {
                        return None;
                    }
                    empty = Some(idx);
                }
                Cell::Taken(s) if s == side => owned += 1,
                Cell::Taken(_) => return None,
            }
        }

        if owned == 2 {
            empty
        } else {
            None
        }
    }

    // ========================================================================
    // MUTATION (turn coordinator only)
    // ========================================================================

    pub(crate) fn place(&mut self, index: usize, side: Side) {
        self.cells[index] = Cell::Taken(side);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let r = &self.cells[row * 3..row * 3 + 3];
            writeln!(f, " {} | {} | {}", r[0].symbol(), r[1].symbol(), r[2].symbol())?;
            if row < 2 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board() {
        let board = Board::parse("XO. .X. ..O").unwrap();
        assert_eq!(board.get(0), Some(Cell::Taken(Side::A)));
        assert_eq!(board.get(1), Some(Cell::Taken(Side::B)));
        assert_eq!(board.get(2), Some(Cell::Empty));
        assert_eq!(board.count(Side::A), 2);
        assert_eq!(board.count(Side::B), 2);
        assert_eq!(board.side_to_move(), Side::A);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Board::parse("XO").is_err());
        assert!(Board::parse("XOZ......").is_err());
        // B ahead of A is unreachable
        assert!(Board::parse("OO.......").is_err());
        // A two ahead is unreachable
        assert!(Board::parse("XX.......").is_err());
    }

    #[test]
    fn test_empty_cells() {
        let board = Board::parse("X...O....").unwrap();
        assert_eq!(board.empty_cells(), vec![1, 2, 3, 5, 6, 7, 8]);
        assert!(!board.is_full());
        assert!(board.is_empty_at(1));
        assert!(!board.is_empty_at(0));
        assert!(!board.is_empty_at(9));
    }

    #[test]
    fn test_winning_line() {
        let board = Board::parse("XXX OO. ...").unwrap();
        assert_eq!(board.winning_line(), Some((Side::A, [0, 1, 2])));

        let board = Board::parse("X.O .XO ..X").unwrap();
        assert_eq!(board.winning_line(), Some((Side::A, [0, 4, 8])));

        assert_eq!(Board::new().winning_line(), None);
    }

    #[test]
    fn test_immediate_wins() {
        let board = Board::parse("XX. OO. ...").unwrap();
        assert_eq!(board.immediate_wins(Side::A), vec![2]);
        assert_eq!(board.immediate_wins(Side::B), vec![5]);

        // Blocked line offers nothing
        let board = Board::parse("XXO .O. ...").unwrap();
        assert!(board.immediate_wins(Side::A).is_empty());
    }

    #[test]
    fn test_cell_serializes_as_option() {
        let board = Board::parse("X...O....").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with(r#"{"cells":["A",null"#));
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_display() {
        let text = Board::parse("XO. ... ...").unwrap().to_string();
        assert!(text.starts_with(" X | O | ."));
        assert_eq!(text.lines().count(), 5);
    }
}
