//! Session statistics endpoint

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{extract::State, Json};
use gridplay_core::{Badge, SessionStats};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct BadgeInfo {
    pub id: Badge,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<Badge> for BadgeInfo {
    fn from(badge: Badge) -> Self {
        Self {
            id: badge,
            title: badge.title(),
            description: badge.description(),
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: SessionStats,
    pub win_rate: f32,
    /// Earned badges only
    pub badges: Vec<BadgeInfo>,
}

pub async fn get_stats(State(state): State<Arc<ServerState>>) -> Result<Json<StatsResponse>, ApiError> {
    let session = state.read()?;
    let stats = session.statistics();
    Ok(Json(StatsResponse {
        win_rate: stats.win_rate(),
        badges: session.badges().into_iter().map(BadgeInfo::from).collect(),
        stats,
    }))
}
