//! Session facade: the engine surface a UI talks to
//!
//! Owns every game and tournament of one session plus the session
//! statistics. Statistics are updated exactly once per completed game, at
//! the move that ends it.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::Difficulty;
use crate::board::Side;
use crate::error::{Error, Result};
use crate::eval::GameResult;
use crate::game::{BoardSnapshot, Game, GameMode};
use crate::settings::Settings;
use crate::stats::{Badge, SessionStats};
use crate::tournament::{Seat, Tournament, TournamentOutcome, TournamentState, TournamentStatus};

/// Side whose results feed the session statistics
pub const TRACKED_SIDE: Side = Side::A;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameHandle(pub u64);

impl fmt::Display for GameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentHandle(pub u64);

impl fmt::Display for TournamentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct GameEntry {
    game: Game,
    tournament: Option<TournamentHandle>,
}

#[derive(Debug, Default)]
pub struct Session {
    games: FxHashMap<GameHandle, GameEntry>,
    tournaments: FxHashMap<TournamentHandle, Tournament>,
    stats: SessionStats,
    next_id: u64,
    /// Base seed for engine players (None = entropy)
    seed: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose engine players are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            seed: settings.seed,
            ..Self::default()
        }
    }

    // ========================================================================
    // GAMES
    // ========================================================================

    pub fn new_game(&mut self, mode: GameMode, difficulty: Difficulty) -> GameHandle {
        let handle = GameHandle(self.next_id());
        let game = self.create_game(mode, difficulty, handle.0);
        debug!(game = %handle, %mode, %difficulty, "New game");
        self.games.insert(
            handle,
            GameEntry {
                game,
                tournament: None,
            },
        );
        handle
    }

    /// Apply a move; the engine answers within the same call when it is
    /// the engine's turn.
    pub fn apply_move(&mut self, handle: GameHandle, cell: usize) -> Result<BoardSnapshot> {
        let entry = self
            .games
            .get_mut(&handle)
            .ok_or(Error::UnknownGame(handle))?;

        // Errors (including moves on finished games) leave everything as is,
        // so reaching a terminal status here means the game just ended.
        let snapshot = entry.game.apply_move(cell)?;
        if snapshot.status.is_terminal() {
            let tournament = entry.tournament;
            self.finish_game(handle, &snapshot, tournament);
        }
        Ok(snapshot)
    }

    pub fn snapshot(&self, handle: GameHandle) -> Result<BoardSnapshot> {
        self.game(handle).map(Game::snapshot)
    }

    pub fn game(&self, handle: GameHandle) -> Result<&Game> {
        self.games
            .get(&handle)
            .map(|entry| &entry.game)
            .ok_or(Error::UnknownGame(handle))
    }

    /// Abandon the current game and start over on the same handle.
    /// Tournament games are one round each and cannot be replayed.
    pub fn reset(&mut self, handle: GameHandle) -> Result<BoardSnapshot> {
        let entry = self
            .games
            .get_mut(&handle)
            .ok_or(Error::UnknownGame(handle))?;
        if entry.tournament.is_some() {
            return Err(Error::TournamentGameLocked(handle));
        }
        entry.game.reset();
        Ok(entry.game.snapshot())
    }

    /// Drop a game, returning its final snapshot. An unfinished tournament
    /// game must be played out first.
    pub fn end_game(&mut self, handle: GameHandle) -> Result<BoardSnapshot> {
        let entry = self.games.get(&handle).ok_or(Error::UnknownGame(handle))?;
        if entry.tournament.is_some() && !entry.game.is_over() {
            return Err(Error::TournamentGameLocked(handle));
        }
        self.games
            .remove(&handle)
            .map(|entry| entry.game.snapshot())
            .ok_or(Error::UnknownGame(handle))
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    // ========================================================================
    // STATISTICS
    // ========================================================================

    pub fn statistics(&self) -> SessionStats {
        self.stats.clone()
    }

    pub fn badges(&self) -> Vec<Badge> {
        self.stats.badges()
    }

    // ========================================================================
    // TOURNAMENTS
    // ========================================================================

    pub fn start_tournament(
        &mut self,
        rounds: u32,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Result<TournamentHandle> {
        let tournament = Tournament::start(rounds, first, second)?;
        let handle = TournamentHandle(self.next_id());
        info!(tournament = %handle, rounds, "Tournament started");
        self.tournaments.insert(handle, tournament);
        Ok(handle)
    }

    pub fn tournament_state(&self, handle: TournamentHandle) -> Result<TournamentState> {
        self.tournaments
            .get(&handle)
            .map(Tournament::state)
            .ok_or(Error::UnknownTournament(handle))
    }

    /// Start the next round's game. The first contestant plays side A
    /// against the engine.
    pub fn new_tournament_game(
        &mut self,
        tournament: TournamentHandle,
        difficulty: Difficulty,
    ) -> Result<GameHandle> {
        let t = self
            .tournaments
            .get(&tournament)
            .ok_or(Error::UnknownTournament(tournament))?;
        if t.is_completed() {
            return Err(Error::TournamentCompleted);
        }
        // One open game per round
        let round_open = self
            .games
            .values()
            .any(|entry| entry.tournament == Some(tournament) && !entry.game.is_over());
        if round_open {
            return Err(Error::RoundInProgress(tournament));
        }

        let handle = GameHandle(self.next_id());
        let game = self.create_game(GameMode::Tournament, difficulty, handle.0);
        debug!(game = %handle, %tournament, "New tournament game");
        self.games.insert(
            handle,
            GameEntry {
                game,
                tournament: Some(tournament),
            },
        );
        Ok(handle)
    }

    /// Tournament a game counts towards
    pub fn tournament_of(&self, handle: GameHandle) -> Result<TournamentHandle> {
        let entry = self.games.get(&handle).ok_or(Error::UnknownGame(handle))?;
        entry.tournament.ok_or(Error::NotTournamentGame(handle))
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn create_game(&self, mode: GameMode, difficulty: Difficulty, id: u64) -> Game {
        match self.seed {
            Some(seed) => Game::with_seed(mode, difficulty, seed.wrapping_add(id)),
            None => Game::new(mode, difficulty),
        }
    }

    fn finish_game(
        &mut self,
        handle: GameHandle,
        snapshot: &BoardSnapshot,
        tournament: Option<TournamentHandle>,
    ) {
        let outcome =
            self.stats
                .record_finished_board(snapshot.status, &snapshot.board, TRACKED_SIDE);
        info!(game = %handle, ?outcome, "Game recorded");

        let Some(th) = tournament else { return };
        let Some(t) = self.tournaments.get_mut(&th) else {
            warn!(tournament = %th, "Tournament vanished before game finished");
            return;
        };

        let winner = match snapshot.status {
            GameResult::Win(Side::A) => Some(Seat::First),
            GameResult::Win(Side::B) => Some(Seat::Second),
            _ => None,
        };
        match t.record_game(winner) {
            Ok(TournamentStatus::Completed) => {
                if let Some(TournamentOutcome::Winner {
                    seat: Seat::First, ..
                }) = t.outcome()
                {
                    self.stats.record_tournament_win();
                }
            }
            Ok(TournamentStatus::Active) => {}
            Err(e) => warn!(tournament = %th, error = %e, "Game result not counted"),
        }
    }
}
