//! GRIDPLAY Core - Grid game engine and AI
//!
//! This crate provides the core game logic for GRIDPLAY:
//! - Board model (3x3 grid, row-major indices)
//! - Win/draw evaluation
//! - Tiered heuristic move selection
//! - Turn coordinator state machine
//! - Session statistics and achievement badges
//! - Two-contestant tournament progression
//! - Session facade tying games, statistics and tournaments together

pub mod ai;
pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod session;
pub mod settings;
pub mod stats;
pub mod tournament;

// Re-exports for convenient access
pub use ai::{select_move, Difficulty, MoveSelector};
pub use board::{Board, Cell, Side, BOARD_SIZE, CENTER, CORNERS, WINNING_LINES};
pub use error::{Error, IllegalReason, Result};
pub use eval::{evaluate, GameResult};
pub use game::{BoardSnapshot, Controller, Game, GameMode, TurnPhase};
pub use session::{GameHandle, Session, TournamentHandle, TRACKED_SIDE};
pub use settings::Settings;
pub use stats::{Badge, Outcome, SessionStats};
pub use tournament::{
    Contestant, Seat, Tournament, TournamentOutcome, TournamentState, TournamentStatus,
};
