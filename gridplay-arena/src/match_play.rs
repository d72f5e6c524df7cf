//! Match play - multiple games between two engine configurations
//!
//! Level 2 - Phase-level implementation

use gridplay_core::{GameResult, Side};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::{AiConfig, MatchConfig};
use crate::game_runner::{GameOutcome, GameRunner};

/// Result of a match (multiple games)
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    /// Wins for the first configuration
    pub first_wins: u32,
    /// Wins for the second configuration
    pub second_wins: u32,
    /// Drawn games
    pub draws: u32,
    /// Games that stopped before a result; counted apart from draws
    pub unfinished: u32,
    /// Average game length in moves
    pub avg_moves: f32,
    /// Total games played
    pub games_played: u32,
    /// Individual game outcomes
    #[serde(skip)]
    pub game_outcomes: Vec<GameOutcome>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            unfinished: 0,
            avg_moves: 0.0,
            games_played: 0,
            game_outcomes: Vec::new(),
        }
    }

    /// Combine two results
    pub fn combine(&self, other: &MatchResult) -> MatchResult {
        let total_games = self.games_played + other.games_played;
        let avg_moves = if total_games > 0 {
            (self.avg_moves * self.games_played as f32 + other.avg_moves * other.games_played as f32)
                / total_games as f32
        } else {
            0.0
        };

        let mut game_outcomes = self.game_outcomes.clone();
        game_outcomes.extend(other.game_outcomes.iter().cloned());

        MatchResult {
            first_wins: self.first_wins + other.first_wins,
            second_wins: self.second_wins + other.second_wins,
            draws: self.draws + other.draws,
            unfinished: self.unfinished + other.unfinished,
            avg_moves,
            games_played: total_games,
            game_outcomes,
        }
    }

    pub fn first_win_rate(&self) -> f32 {
        rate(self.first_wins, self.games_played)
    }

    pub fn second_win_rate(&self) -> f32 {
        rate(self.second_wins, self.games_played)
    }

    pub fn draw_rate(&self) -> f32 {
        rate(self.draws, self.games_played)
    }

    /// Wins = 1.0, Draws = 0.5, Losses = 0.0
    pub fn score_for_first(&self) -> f32 {
        self.first_wins as f32 + 0.5 * self.draws as f32
    }

    pub fn score_for_second(&self) -> f32 {
        self.second_wins as f32 + 0.5 * self.draws as f32
    }
}

fn rate(count: u32, games: u32) -> f32 {
    if games == 0 {
        0.0
    } else {
        count as f32 / games as f32
    }
}

/// Play a match, in parallel when `config.parallel` is set
pub fn run_match(first: &AiConfig, second: &AiConfig, config: &MatchConfig) -> MatchResult {
    if config.parallel {
        play_match_parallel(first, second, config)
    } else {
        play_match(first, second, config)
    }
}

/// Play a match between two configurations (Level 2 phase)
///
/// Alternates which configuration moves first.
pub fn play_match(first: &AiConfig, second: &AiConfig, config: &MatchConfig) -> MatchResult {
    if config.games == 0 {
        return MatchResult::empty();
    }

    let game_configs = prepare_game_configs(config.games);
    let results: Vec<_> = game_configs
        .iter()
        .map(|gc| play_single_game(first, second, gc, config.seed))
        .collect();
    aggregate_results(results)
}

/// Play a match with parallel execution (Level 2 phase)
pub fn play_match_parallel(first: &AiConfig, second: &AiConfig, config: &MatchConfig) -> MatchResult {
    if config.games == 0 {
        return MatchResult::empty();
    }

    let game_configs = prepare_game_configs(config.games);
    let results: Vec<_> = game_configs
        .par_iter()
        .map(|gc| play_single_game(first, second, gc, config.seed))
        .collect();
    aggregate_results(results)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Configuration for a single game in a match
#[derive(Clone, Copy)]
struct GameConfig {
    /// Whether the first configuration plays side A this game
    first_opens: bool,
    /// Game index (for seeding)
    game_index: usize,
}

/// Prepare game configurations for a match
fn prepare_game_configs(games: usize) -> Vec<GameConfig> {
    (0..games)
        .map(|i| GameConfig {
            first_opens: i % 2 == 0,
            game_index: i,
        })
        .collect()
}

/// Outcome with context about which configuration opened
struct GameOutcomeWithContext {
    outcome: GameOutcome,
    first_opened: bool,
}

fn play_single_game(
    first: &AiConfig,
    second: &AiConfig,
    gc: &GameConfig,
    base_seed: u64,
) -> GameOutcomeWithContext {
    // Two seeds per game, one for each engine
    let mut runner = GameRunner::new(base_seed.wrapping_add(2 * gc.game_index as u64));
    let outcome = if gc.first_opens {
        runner.play_game(first, second)
    } else {
        runner.play_game(second, first)
    };
    debug!(game = gc.game_index, result = ?outcome.result, "Match game finished");

    GameOutcomeWithContext {
        outcome,
        first_opened: gc.first_opens,
    }
}

/// Aggregate game outcomes into a match result
fn aggregate_results(outcomes: Vec<GameOutcomeWithContext>) -> MatchResult {
    let mut first_wins = 0u32;
    let mut second_wins = 0u32;
    let mut draws = 0u32;
    let mut unfinished = 0u32;
    let mut total_moves = 0usize;
    let mut game_outcomes = Vec::with_capacity(outcomes.len());

    for owc in outcomes {
        total_moves += owc.outcome.moves.len();

        // Attribute wins based on who was playing side A
        match owc.outcome.result {
            GameResult::Win(Side::A) if owc.first_opened => first_wins += 1,
            GameResult::Win(Side::A) => second_wins += 1,
            GameResult::Win(Side::B) if owc.first_opened => second_wins += 1,
            GameResult::Win(Side::B) => first_wins += 1,
            GameResult::Draw => draws += 1,
            GameResult::InProgress => unfinished += 1,
        }
        game_outcomes.push(owc.outcome);
    }

    let games_played = game_outcomes.len() as u32;
    let avg_moves = if games_played > 0 {
        total_moves as f32 / games_played as f32
    } else {
        0.0
    };

    MatchResult {
        first_wins,
        second_wins,
        draws,
        unfinished,
        avg_moves,
        games_played,
        game_outcomes,
    }
}
