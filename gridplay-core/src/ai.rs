//! Tiered heuristic move selection
//!
//! Positional rules only, no game-tree search. Ties between equally good
//! cells are broken uniformly at random, so callers should assert legality
//! and tier guarantees rather than exact choices.

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Side, CENTER, CORNERS};
use crate::error::Error;

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Strategy strength, ordered weakest to strongest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Random empty cell
    Easy,
    /// Win, else block, else random
    Medium,
    /// Win, block, center, corner, random
    Hard,
    /// Same policy as `Hard`
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

// ============================================================================
// MOVE SELECTOR
// ============================================================================

/// Engine player for one side of a game
#[derive(Clone, Debug)]
pub struct MoveSelector {
    pub difficulty: Difficulty,
    rng: ChaCha8Rng,
}

impl MoveSelector {
    /// Selector seeded from OS entropy
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reproducible selector
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a cell for `side`, `None` only when the board is full
    pub fn select_move(&mut self, board: &Board, side: Side) -> Option<usize> {
        select_move(board, side, self.difficulty, &mut self.rng)
    }
}

/// Pick a cell for `side` at the given tier.
///
/// Always returns an empty cell; `None` only when the board is full.
pub fn select_move<R: Rng>(
    board: &Board,
    side: Side,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => random_empty(board, rng),
        Difficulty::Medium => tactical_move(board, side, rng).or_else(|| random_empty(board, rng)),
        Difficulty::Hard | Difficulty::Expert => tactical_move(board, side, rng)
            .or_else(|| positional_move(board, rng))
            .or_else(|| random_empty(board, rng)),
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Completing move first, then a block. Winning always beats blocking.
fn tactical_move<R: Rng>(board: &Board, side: Side, rng: &mut R) -> Option<usize> {
    let wins = board.immediate_wins(side);
    if let Some(&cell) = wins.choose(rng) {
        return Some(cell);
    }

    let threats = board.immediate_wins(side.opponent());
    threats.choose(rng).copied()
}

/// Center if free, otherwise a random free corner
fn positional_move<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    if board.is_empty_at(CENTER) {
        return Some(CENTER);
    }

    let corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&i| board.is_empty_at(i))
        .collect();
    corners.choose(rng).copied()
}

fn random_empty<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    board.empty_cells().choose(rng).copied()
}

// ============================================================================
// TESTS
// ============================================================================
