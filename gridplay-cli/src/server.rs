//! Serve command - start the HTTP server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to gridplay-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use gridplay_core::Settings;
use gridplay_server::{run_server, ServerConfig, ServerState};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8002")]
    pub port: u16,

    /// Directory containing static files for the front end
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Build the shared session
/// 3. Start server (blocking)
pub fn run(args: ServerArgs, settings: Settings) -> Result<()> {
    let config = configure_server(&args)?;

    let state = build_state(settings);

    tracing::info!("Starting GRIDPLAY server on port {}", config.port);

    start_server(config, state)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
    })
}

/// Shared session seeded from settings; request defaults come from the
/// same settings
fn build_state(settings: Settings) -> ServerState {
    tracing::info!(
        mode = %settings.mode,
        difficulty = %settings.difficulty,
        seeded = settings.seed.is_some(),
        "Session defaults"
    );
    ServerState::from_settings(settings)
}

/// Start the server (blocking)
fn start_server(config: ServerConfig, state: ServerState) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server(config, state))
}

// ============================================================================
// LEVEL 4 - VALIDATION
// ============================================================================

/// Missing directory only warns; a file in its place is an error
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
