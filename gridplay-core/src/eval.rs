//! Win/draw evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "winner", rename_all = "snake_case")]
pub enum GameResult {
    InProgress,
    Win(Side),
    Draw,
}

impl GameResult {
    /// Win or draw
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::Win(side) => Some(side),
            _ => None,
        }
    }
}

/// Report the terminal status of a board.
///
/// Runs after every move. Boards produced by illegal sequences (two
/// completed lines for different sides) are not detected here; the first
/// completed line wins.
pub fn evaluate(board: &Board) -> GameResult {
    if let Some((side, _)) = board.winning_line() {
        return GameResult::Win(side);
    }
    if board.is_full() {
        GameResult::Draw
    } else {
        GameResult::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    const A: Cell = Cell::Taken(Side::A);
    const B: Cell = Cell::Taken(Side::B);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameResult::InProgress);
    }

    #[test]
    fn test_every_line_wins() {
        for line in crate::board::WINNING_LINES {
            let mut cells = [E; 9];
            for i in line {
                cells[i] = B;
            }
            assert_eq!(
                evaluate(&Board::from_cells(cells)),
                GameResult::Win(Side::B),
                "line {:?}",
                line
            );
        }
    }

    #[test]
    fn test_full_board_draw() {
        let board = Board::from_cells([A, B, A, B, A, B, B, A, B]);
        assert_eq!(evaluate(&board), GameResult::Draw);
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        let board = Board::parse("XOX OXO OXX").unwrap();
        assert!(board.is_full());
        assert_eq!(evaluate(&board), GameResult::Win(Side::A));
    }

    #[test]
    fn test_early_win_before_full() {
        let board = Board::parse("OO. XXX ...").unwrap();
        assert_eq!(evaluate(&board), GameResult::Win(Side::A));
    }

    #[test]
    fn test_result_helpers() {
        assert!(!GameResult::InProgress.is_terminal());
        assert!(GameResult::Draw.is_terminal());
        assert_eq!(GameResult::Win(Side::A).winner(), Some(Side::A));
        assert_eq!(GameResult::Draw.winner(), None);
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(GameResult::Win(Side::B)).unwrap();
        assert_eq!(json["status"], "win");
        assert_eq!(json["winner"], "B");
        let json = serde_json::to_value(GameResult::Draw).unwrap();
        assert_eq!(json["status"], "draw");
    }
}
