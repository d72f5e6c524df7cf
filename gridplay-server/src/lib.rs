//! GRIDPLAY Server - HTTP API for the browser front end
//!
//! This crate provides the web backend:
//! - REST API over one shared engine session
//! - Game, statistics and tournament endpoints
//! - Static file serving for the front end

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            static_dir: "web".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Game API
        .route("/api/game/start", post(routes::game::start_game))
        .route(
            "/api/game/:id",
            get(routes::game::get_game).delete(routes::game::end_game),
        )
        .route("/api/game/:id/move", post(routes::game::make_move))
        .route("/api/game/:id/reset", post(routes::game::reset_game))
        // Statistics
        .route("/api/stats", get(routes::stats::get_stats))
        // Tournament API
        .route(
            "/api/tournament/start",
            post(routes::tournament::start_tournament),
        )
        .route("/api/tournament/:id", get(routes::tournament::get_tournament))
        .route(
            "/api/tournament/:id/game",
            post(routes::tournament::start_tournament_game),
        )
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig, state: ServerState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let router = create_router(&config, Arc::new(state));

    tracing::info!("GRIDPLAY Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
