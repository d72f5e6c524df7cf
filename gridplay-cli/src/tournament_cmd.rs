//! Tournament command - best-of-N between two engine tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: report_results()
//! - Level 3: (delegated to gridplay-arena)
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use gridplay_arena::{run_tournament, AiConfig, TournamentConfig, TournamentReport};
use gridplay_core::{Difficulty, GameResult, Side, TournamentOutcome};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TournamentArgs {
    /// Number of rounds (best of N)
    #[arg(long, default_value = "5")]
    pub rounds: u32,

    /// First contestant's tier
    #[arg(long, default_value = "medium")]
    pub first: Difficulty,

    /// Second contestant's tier
    #[arg(long, default_value = "hard")]
    pub second: Difficulty,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run tournament command
pub fn run(args: TournamentArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed);
    let report = run_tournament(&config).context("Tournament could not start")?;
    report_results(&config, &report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_results(config: &TournamentConfig, report: &TournamentReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\n=== Tournament: best of {} ===", config.rounds);
    for (i, game) in report.games.iter().enumerate() {
        println!("Round {}: {}", i + 1, describe_round(config, i, game.result));
    }
    let [first, second] = &report.state.contestants;
    println!(
        "\nFinal: {} {} - {} {} ({} drawn)",
        first.name, first.wins, second.wins, second.name, report.state.draws
    );
    println!("{}", format_outcome(report.state.outcome.as_ref()));
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Contestants get distinct names even when they share a tier
fn build_config(args: &TournamentArgs, seed: Option<u64>) -> TournamentConfig {
    let first = AiConfig::new(args.first).named(format!("{} (1)", args.first));
    let second = AiConfig::new(args.second).named(format!("{} (2)", args.second));
    let mut config = TournamentConfig::best_of(args.rounds, first, second);
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config
}

/// Round `index` (0-based) had the first contestant opening when even
fn describe_round(config: &TournamentConfig, index: usize, result: GameResult) -> String {
    let (opener, other) = if index % 2 == 0 {
        (&config.first, &config.second)
    } else {
        (&config.second, &config.first)
    };
    match result {
        GameResult::Win(Side::A) => format!("{} wins", opener.name),
        GameResult::Win(Side::B) => format!("{} wins", other.name),
        _ => "draw".to_string(),
    }
}

fn format_outcome(outcome: Option<&TournamentOutcome>) -> String {
    match outcome {
        Some(TournamentOutcome::Winner { name, .. }) => format!("Champion: {}", name),
        Some(TournamentOutcome::TournamentDraw) => "The tournament is a draw".to_string(),
        None => "Tournament unfinished".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
