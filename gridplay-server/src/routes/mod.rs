//! HTTP route handlers

pub mod game;
pub mod stats;
pub mod status;
pub mod tournament;
