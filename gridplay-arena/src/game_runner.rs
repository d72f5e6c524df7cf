//! Game runner - executes single engine-vs-engine games
//!
//! Level 3 - Step-level implementation

use gridplay_core::{Controller, Game, GameMode, GameResult, MoveSelector, Side};
use serde::Serialize;

use crate::config::AiConfig;

/// Outcome of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameOutcome {
    /// Final game result
    pub result: GameResult,
    /// Cells in the order played
    pub moves: Vec<usize>,
}

impl GameOutcome {
    /// Get winner (None for draw)
    pub fn winner(&self) -> Option<Side> {
        self.result.winner()
    }

    pub fn is_draw(&self) -> bool {
        self.result == GameResult::Draw
    }
}

/// Plays games between engine configurations, handing out fresh seeds
pub struct GameRunner {
    seed_counter: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(seed: u64) -> Self {
        Self { seed_counter: seed }
    }

    /// Play one game with `side_a` moving first. Runs through the turn
    /// coordinator exactly as a human game would.
    pub fn play_game(&mut self, side_a: &AiConfig, side_b: &AiConfig) -> GameOutcome {
        let a = self.selector(side_a);
        let b = self.selector(side_b);
        let game = Game::with_controllers(
            GameMode::Training,
            [Controller::Engine(a), Controller::Engine(b)],
        );

        GameOutcome {
            result: game.result(),
            moves: game.history().to_vec(),
        }
    }

    fn selector(&mut self, config: &AiConfig) -> MoveSelector {
        let seed = config.seed.unwrap_or_else(|| self.next_seed());
        MoveSelector::with_seed(config.difficulty, seed)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }
}
