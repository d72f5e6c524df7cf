//! GRIDPLAY CLI - Command-line interface
//!
//! Commands:
//! - play: Play in the terminal against the engine or a friend
//! - match: Pit two difficulty tiers against each other
//! - tournament: Best-of-N between two engines
//! - serve: Start the HTTP server

mod match_cmd;
mod play;
mod server;
mod tournament_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gridplay_core::Settings;

#[derive(Parser)]
#[command(name = "gridplay")]
#[command(about = "GRIDPLAY tic-tac-toe engine", version)]
struct Cli {
    /// Random seed for reproducible engine play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Settings file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play::PlayArgs),
    /// Play engine-vs-engine games between two tiers
    Match(match_cmd::MatchArgs),
    /// Run a best-of-N tournament between two engines
    Tournament(tournament_cmd::TournamentArgs),
    /// Start the HTTP server
    Serve(server::ServerArgs),
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Play(args) => play::run(args, settings),
        Commands::Match(args) => match_cmd::run(args, settings.seed),
        Commands::Tournament(args) => tournament_cmd::run(args, settings.seed),
        Commands::Serve(args) => server::run(args, settings),
    }
}

/// Log to stderr so JSON reports on stdout stay clean
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Settings file (or defaults), with `--seed` taking precedence
fn load_settings(path: Option<&std::path::Path>, seed: Option<u64>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if seed.is_some() {
        settings.seed = seed;
    }
    tracing::debug!(?settings, "Settings loaded");
    Ok(settings)
}
