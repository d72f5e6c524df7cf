//! Game API endpoints
//!
//! Start a game, read its board, submit moves, start over, drop it.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use gridplay_core::{BoardSnapshot, Difficulty, GameHandle, GameMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct StartGameRequest {
    pub mode: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub cell: usize,
}

/// Snapshot tagged with the handle that addresses the game
#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: GameHandle,
    #[serde(flatten)]
    pub snapshot: BoardSnapshot,
}

/// Start a new game; missing fields fall back to the server settings
pub async fn start_game(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<StartGameRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let mode = match req.mode {
        Some(name) => name.parse::<GameMode>()?,
        None => state.settings.mode,
    };
    let difficulty = match req.difficulty {
        Some(name) => name.parse::<Difficulty>()?,
        None => state.settings.difficulty,
    };

    let mut session = state.write()?;
    let id = session.new_game(mode, difficulty);
    let snapshot = session.snapshot(id)?;
    tracing::debug!(game = %id, %mode, %difficulty, "Game started over HTTP");
    Ok(Json(GameResponse { id, snapshot }))
}

pub async fn get_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = GameHandle(id);
    let snapshot = state.read()?.snapshot(id)?;
    Ok(Json(GameResponse { id, snapshot }))
}

/// Submit a move; the response already contains the engine's reply
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = GameHandle(id);
    let snapshot = state.write()?.apply_move(id, req.cell)?;
    Ok(Json(GameResponse { id, snapshot }))
}

pub async fn reset_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = GameHandle(id);
    let snapshot = state.write()?.reset(id)?;
    Ok(Json(GameResponse { id, snapshot }))
}

/// Drop a game from the session, returning its last snapshot
pub async fn end_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, ApiError> {
    let id = GameHandle(id);
    let snapshot = state.write()?.end_game(id)?;
    tracing::debug!(game = %id, "Game ended over HTTP");
    Ok(Json(GameResponse { id, snapshot }))
}
