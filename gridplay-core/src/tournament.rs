//! Two-contestant tournament progression
//!
//! Best-of-N: the tournament ends once the round counter passes N, or
//! earlier when the leader's margin exceeds the rounds still to play.
//! Drawn games use up a round without crediting anyone.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Tournament lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Active,
    Completed,
}

/// Which of the two contestants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contestant {
    pub name: String,
    pub wins: u32,
}

/// Final verdict of a completed tournament
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum TournamentOutcome {
    Winner { seat: Seat, name: String },
    TournamentDraw,
}

/// Snapshot of a tournament for display
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentState {
    pub current_round: u32,
    pub total_rounds: u32,
    pub contestants: [Contestant; 2],
    pub draws: u32,
    pub status: TournamentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TournamentOutcome>,
}

#[derive(Clone, Debug)]
pub struct Tournament {
    total_rounds: u32,
    current_round: u32,
    contestants: [Contestant; 2],
    draws: u32,
    status: TournamentStatus,
}

impl Tournament {
    /// Round 1 of `rounds`, zero wins each. Zero rounds is rejected.
    pub fn start(rounds: u32, first: impl Into<String>, second: impl Into<String>) -> Result<Self> {
        if rounds == 0 {
            return Err(Error::InvalidRounds(rounds));
        }
        Ok(Self {
            total_rounds: rounds,
            current_round: 1,
            contestants: [
                Contestant {
                    name: first.into(),
                    wins: 0,
                },
                Contestant {
                    name: second.into(),
                    wins: 0,
                },
            ],
            draws: 0,
            status: TournamentStatus::Active,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == TournamentStatus::Completed
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn contestant(&self, seat: Seat) -> &Contestant {
        &self.contestants[seat.index()]
    }

    /// Rounds not yet played
    pub fn remaining_rounds(&self) -> u32 {
        (self.total_rounds + 1).saturating_sub(self.current_round)
    }

    /// Verdict, `None` while active
    pub fn outcome(&self) -> Option<TournamentOutcome> {
        if !self.is_completed() {
            return None;
        }
        let [first, second] = &self.contestants;
        let outcome = if first.wins > second.wins {
            TournamentOutcome::Winner {
                seat: Seat::First,
                name: first.name.clone(),
            }
        } else if second.wins > first.wins {
            TournamentOutcome::Winner {
                seat: Seat::Second,
                name: second.name.clone(),
            }
        } else {
            TournamentOutcome::TournamentDraw
        };
        Some(outcome)
    }

    pub fn state(&self) -> TournamentState {
        TournamentState {
            current_round: self.current_round,
            total_rounds: self.total_rounds,
            contestants: self.contestants.clone(),
            draws: self.draws,
            status: self.status,
            outcome: self.outcome(),
        }
    }

    // ========================================================================
    // PROGRESSION
    // ========================================================================

    /// Record one completed game (`None` for a draw) and advance the round
    pub fn record_game(&mut self, winner: Option<Seat>) -> Result<TournamentStatus> {
        if self.is_completed() {
            return Err(Error::TournamentCompleted);
        }

        match winner {
            Some(seat) => self.contestants[seat.index()].wins += 1,
            None => self.draws += 1,
        }
        self.current_round += 1;

        if self.current_round > self.total_rounds || self.is_clinched() {
            self.status = TournamentStatus::Completed;
            info!(
                rounds_played = self.current_round - 1,
                outcome = ?self.outcome(),
                "Tournament completed"
            );
        }
        Ok(self.status)
    }

    /// The trailing contestant cannot catch up in the remaining rounds
    fn is_clinched(&self) -> bool {
        let [first, second] = &self.contestants;
        first.wins.abs_diff(second.wins) > self.remaining_rounds()
    }
}
