//! Tournament execution - best-of-N between two engines
//!
//! Level 1 - Orchestration and Level 2 - Phases

use gridplay_core::{Result, Seat, Side, Tournament, TournamentState};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::TournamentConfig;
use crate::game_runner::{GameOutcome, GameRunner};

/// Result of a tournament
#[derive(Clone, Debug, Serialize)]
pub struct TournamentReport {
    /// Final standings and verdict
    pub state: TournamentState,
    /// Every game played, in round order
    pub games: Vec<GameOutcome>,
}

impl TournamentReport {
    pub fn rounds_played(&self) -> usize {
        self.games.len()
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a tournament to completion (Level 1 orchestration)
///
/// The contestants swap sides every round; the first contestant opens
/// odd rounds. Fails only when the round count is zero.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentReport> {
    let mut tournament = Tournament::start(
        config.rounds,
        config.first.name.clone(),
        config.second.name.clone(),
    )?;
    let mut runner = GameRunner::new(config.seed);
    let mut games = Vec::new();

    info!(
        rounds = config.rounds,
        first = %config.first.name,
        second = %config.second.name,
        "Starting tournament"
    );

    while !tournament.is_completed() {
        let round = tournament.current_round();
        let (outcome, winner) = play_round(config, &mut runner, round);
        debug!(round, winner = ?winner, moves = outcome.moves.len(), "Round finished");
        tournament.record_game(winner)?;
        games.push(outcome);
    }

    Ok(TournamentReport {
        state: tournament.state(),
        games,
    })
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Play one round and map the board winner back to a seat
fn play_round(
    config: &TournamentConfig,
    runner: &mut GameRunner,
    round: u32,
) -> (GameOutcome, Option<Seat>) {
    let first_opens = round % 2 == 1;
    let outcome = if first_opens {
        runner.play_game(&config.first, &config.second)
    } else {
        runner.play_game(&config.second, &config.first)
    };
    let winner = outcome.winner().map(|side| seat_for(side, first_opens));
    (outcome, winner)
}

fn seat_for(side: Side, first_opens: bool) -> Seat {
    match (side, first_opens) {
        (Side::A, true) | (Side::B, false) => Seat::First,
        (Side::A, false) | (Side::B, true) => Seat::Second,
    }
}
