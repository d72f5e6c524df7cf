//! Error types for the game engine

use std::fmt;

use thiserror::Error;

use crate::session::{GameHandle, TournamentHandle};

/// Why a move was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    OutOfRange,
    Occupied,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::OutOfRange => write!(f, "out of range (must be 0-8)"),
            IllegalReason::Occupied => write!(f, "already occupied"),
        }
    }
}

/// Engine error. None of these leave a game in a changed state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: cell {index} is {reason}")]
    IllegalMove { index: usize, reason: IllegalReason },

    #[error("game already over")]
    GameAlreadyOver,

    #[error("unknown game {0}")]
    UnknownGame(GameHandle),

    #[error("unknown tournament {0}")]
    UnknownTournament(TournamentHandle),

    #[error("tournament already completed")]
    TournamentCompleted,

    #[error("tournament needs at least one round, got {0}")]
    InvalidRounds(u32),

    #[error("unknown difficulty '{0}' (expected easy, medium, hard or expert)")]
    UnknownDifficulty(String),

    #[error("unknown game mode '{0}'")]
    UnknownMode(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("game {0} is not part of a tournament")]
    NotTournamentGame(GameHandle),

    #[error("tournament {0} already has a round in progress")]
    RoundInProgress(TournamentHandle),

    #[error("tournament game {0} cannot be restarted or abandoned mid-round")]
    TournamentGameLocked(GameHandle),
}

impl Error {
    /// Whether the caller should simply re-prompt for a different cell
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, Error::IllegalMove { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
