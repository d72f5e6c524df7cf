//! Match command - play games between two difficulty tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_batches(), report_results()
//! - Level 3: (delegated to gridplay-arena)
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use gridplay_arena::{run_match, AiConfig, MatchConfig, MatchResult};
use gridplay_core::Difficulty;

/// Games per progress update. Even, so each batch alternates openers evenly.
const BATCH_SIZE: usize = 10;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// First engine tier
    #[arg(long, default_value = "easy")]
    pub first: Difficulty,

    /// Second engine tier
    #[arg(long, default_value = "hard")]
    pub second: Difficulty,

    /// Number of games to play (will alternate who opens)
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Play games one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build both engine configurations
/// 2. Play the match in batches, updating the progress bar
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let first = AiConfig::new(args.first);
    let second = AiConfig::new(args.second);
    let config = MatchConfig {
        games: args.games,
        parallel: !args.sequential,
        seed: seed.unwrap_or(MatchConfig::default().seed),
    };

    tracing::info!(
        "Starting match: {} vs {} ({} games)",
        first.name,
        second.name,
        config.games
    );

    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        create_progress_bar(config.games)?
    };
    let result = play_batches(&first, &second, &config, &progress);
    progress.finish_and_clear();

    report_results(&first, &second, &result, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play the match in fixed-size batches. Batch seeds continue the match
/// seed sequence, so the result equals one unbatched run.
fn play_batches(
    first: &AiConfig,
    second: &AiConfig,
    config: &MatchConfig,
    progress: &ProgressBar,
) -> MatchResult {
    let mut total = MatchResult::empty();
    let mut start = 0;

    while start < config.games {
        let games = BATCH_SIZE.min(config.games - start);
        let batch = MatchConfig {
            games,
            parallel: config.parallel,
            seed: config.seed.wrapping_add(2 * start as u64),
        };
        let result = run_match(first, second, &batch);
        total = total.combine(&result);
        progress.inc(games as u64);
        start += games;
    }

    total
}

fn report_results(first: &AiConfig, second: &AiConfig, result: &MatchResult, json: bool) -> Result<()> {
    if json {
        print_json_results(first, second, result)
    } else {
        print_text_results(first, second, result);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_progress_bar(games: usize) -> Result<ProgressBar> {
    let bar = ProgressBar::new(games as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} {elapsed_precise} [{bar:30}] {pos}/{len} games")?
            .progress_chars("=> "),
    );
    Ok(bar)
}

fn print_json_results(first: &AiConfig, second: &AiConfig, result: &MatchResult) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        first: &'a AiConfig,
        second: &'a AiConfig,
        #[serde(flatten)]
        result: &'a MatchResult,
        first_win_rate: f32,
        second_win_rate: f32,
        draw_rate: f32,
    }

    let output = JsonOutput {
        first,
        second,
        result,
        first_win_rate: result.first_win_rate(),
        second_win_rate: result.second_win_rate(),
        draw_rate: result.draw_rate(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text_results(first: &AiConfig, second: &AiConfig, result: &MatchResult) {
    println!("\n=== Match Results ===");
    println!("Total games: {}", result.games_played);
    println!(
        "{:<8} wins: {} ({:.1}%)",
        first.name,
        result.first_wins,
        result.first_win_rate() * 100.0
    );
    println!(
        "{:<8} wins: {} ({:.1}%)",
        second.name,
        result.second_wins,
        result.second_win_rate() * 100.0
    );
    println!("Draws:         {} ({:.1}%)", result.draws, result.draw_rate() * 100.0);
    println!("Avg moves:     {:.1}", result.avg_moves);
    println!(
        "Score:         {:.1} - {:.1}",
        result.score_for_first(),
        result.score_for_second()
    );
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_match_single_run() {
        let first = AiConfig::new(Difficulty::Easy);
        let second = AiConfig::new(Difficulty::Medium);
        let config = MatchConfig::new(25).with_seed(11);

        let batched = play_batches(&first, &second, &config, &ProgressBar::hidden());
        let single = run_match(&first, &second, &config);
        assert_eq!(batched.games_played, 25);
        assert_eq!(batched.first_wins, single.first_wins);
        assert_eq!(batched.second_wins, single.second_wins);
        assert_eq!(batched.draws, single.draws);
    }

    #[test]
    fn test_progress_counts_games() {
        let easy = AiConfig::new(Difficulty::Easy);
        let progress = ProgressBar::hidden();
        play_batches(&easy, &easy, &MatchConfig::new(12), &progress);
        assert_eq!(progress.position(), 12);
    }

    #[test]
    fn test_create_progress_bar() {
        let bar = create_progress_bar(40).unwrap();
        assert_eq!(bar.length(), Some(40));
    }
}
