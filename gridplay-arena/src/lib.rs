//! GRIDPLAY Arena - Engine-vs-engine play for balancing difficulty tiers
//!
//! This crate provides match infrastructure:
//! - Single games between two engine configurations
//! - Multi-game matches with alternating first player
//! - Best-of-N tournaments driven through the core tournament rules
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: run_match, play_match, play_match_parallel (phases)
//! - Level 3: GameRunner::play_game (steps)
//! - Level 4: utilities, configuration

mod config;
mod game_runner;
mod match_play;
mod tournament;

pub use config::{AiConfig, MatchConfig, TournamentConfig};
pub use game_runner::{GameOutcome, GameRunner};
pub use match_play::{play_match, play_match_parallel, run_match, MatchResult};
pub use tournament::{run_tournament, TournamentReport};
