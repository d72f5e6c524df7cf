//! Tournament API endpoints

use crate::error::ApiError;
use crate::routes::game::GameResponse;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use gridplay_core::{Difficulty, TournamentHandle, TournamentState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct StartTournamentRequest {
    pub rounds: u32,
    /// Display names; defaults to the configured player and opponent
    pub contestants: Option<[String; 2]>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TournamentGameRequest {
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TournamentResponse {
    pub id: TournamentHandle,
    #[serde(flatten)]
    pub state: TournamentState,
}

pub async fn start_tournament(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<StartTournamentRequest>,
) -> Result<Json<TournamentResponse>, ApiError> {
    let [first, second] = req.contestants.unwrap_or_else(|| {
        [
            state.settings.player_name.clone(),
            state.settings.opponent_name.clone(),
        ]
    });

    let mut session = state.write()?;
    let id = session.start_tournament(req.rounds, first, second)?;
    let tournament = session.tournament_state(id)?;
    Ok(Json(TournamentResponse {
        id,
        state: tournament,
    }))
}

pub async fn get_tournament(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
) -> Result<Json<TournamentResponse>, ApiError> {
    let id = TournamentHandle(id);
    let tournament = state.read()?.tournament_state(id)?;
    Ok(Json(TournamentResponse {
        id,
        state: tournament,
    }))
}

/// Start the next round's game. Finishing it through the move endpoint
/// advances the tournament.
pub async fn start_tournament_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<u64>,
    Json(req): Json<TournamentGameRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let difficulty = match req.difficulty {
        Some(name) => name.parse::<Difficulty>()?,
        None => state.settings.difficulty,
    };

    let mut session = state.write()?;
    let game = session.new_tournament_game(TournamentHandle(id), difficulty)?;
    let snapshot = session.snapshot(game)?;
    Ok(Json(GameResponse { id: game, snapshot }))
}
