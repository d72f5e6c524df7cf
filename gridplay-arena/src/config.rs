//! Configuration types for engine play
//!
//! Level 4 - Utilities and configuration

use gridplay_core::Difficulty;
use serde::{Deserialize, Serialize};

/// One engine contestant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Display name
    pub name: String,
    /// Strategy tier
    pub difficulty: Difficulty,
    /// Random seed for reproducibility (None = derived from the match seed)
    pub seed: Option<u64>,
}

impl AiConfig {
    /// Engine named after its tier
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            name: difficulty.name().to_string(),
            difficulty,
            seed: None,
        }
    }

    /// Set display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

/// Match configuration
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Number of games (should be even so both configs open equally often)
    pub games: usize,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Base seed; game `i` seeds its engines from `seed + 2i`
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            parallel: true,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Create config with specified number of games
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    /// Set base seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Best-of-N tournament between two engines
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    pub rounds: u32,
    pub first: AiConfig,
    pub second: AiConfig,
    /// Base seed for per-round engines
    pub seed: u64,
}

impl TournamentConfig {
    pub fn best_of(rounds: u32, first: AiConfig, second: AiConfig) -> Self {
        Self {
            rounds,
            first,
            second,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.name, "easy");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_ai_config_builders() {
        let config = AiConfig::new(Difficulty::Hard).named("Professor Owl").with_seed(9);
        assert_eq!(config.name, "Professor Owl");
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_match_config_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.games, 100);
        assert!(config.parallel);
        assert_eq!(MatchConfig::new(6).with_seed(1).seed, 1);
    }

    #[test]
    fn test_tournament_config() {
        let config = TournamentConfig::best_of(5, AiConfig::new(Difficulty::Easy), AiConfig::new(Difficulty::Hard));
        assert_eq!(config.rounds, 5);
        assert_eq!(config.second.difficulty, Difficulty::Hard);
    }
}
