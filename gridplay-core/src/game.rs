//! Turn coordinator: the state machine that owns a board during play

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::{Difficulty, MoveSelector};
use crate::board::{Board, Side, BOARD_SIZE};
use crate::error::{Error, IllegalReason, Result};
use crate::eval::{evaluate, GameResult};

// ============================================================================
// MODES AND CONTROLLERS
// ============================================================================

/// How a game was started. Only `HumanVsHuman` lacks an engine-controlled
/// side; every other mode puts the engine on side B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    HumanVsAi,
    HumanVsHuman,
    HumanVsNamedAi,
    Tournament,
    Training,
}

impl GameMode {
    pub fn name(self) -> &'static str {
        match self {
            GameMode::HumanVsAi => "human_vs_ai",
            GameMode::HumanVsHuman => "human_vs_human",
            GameMode::HumanVsNamedAi => "human_vs_named_ai",
            GameMode::Tournament => "tournament",
            GameMode::Training => "training",
        }
    }

    /// Side played by the engine, if any
    pub fn engine_side(self) -> Option<Side> {
        match self {
            GameMode::HumanVsHuman => None,
            _ => Some(Side::B),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::HumanVsAi
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "humanvsai" | "ai" => Ok(GameMode::HumanVsAi),
            "humanvshuman" | "human" => Ok(GameMode::HumanVsHuman),
            "humanvsnamedai" | "namedai" => Ok(GameMode::HumanVsNamedAi),
            "tournament" => Ok(GameMode::Tournament),
            "training" => Ok(GameMode::Training),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Who enters moves for a side
#[derive(Clone, Debug)]
pub enum Controller {
    Human,
    Engine(MoveSelector),
}

impl Controller {
    pub fn is_engine(&self) -> bool {
        matches!(self, Controller::Engine(_))
    }
}

// ============================================================================
// STATE MACHINE
// ============================================================================

/// Coordinator phase. `Evaluating` only exists between a write and the
/// evaluator run inside a single call, so callers never observe it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "value", rename_all = "snake_case")]
pub enum TurnPhase {
    AwaitingMove(Side),
    Evaluating,
    GameOver(GameResult),
}

/// Read-only projection handed to the display layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Board,
    /// Side to move, `None` once the game is over
    pub active_side: Option<Side>,
    pub status: GameResult,
    /// Cells of the completed line, for highlighting
    pub winning_line: Option<[usize; 3]>,
    /// Cells in the order they were played
    pub moves: Vec<usize>,
    pub mode: GameMode,
}

/// A single game. Owns its board exclusively; no state is shared between
/// games.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    phase: TurnPhase,
    mode: GameMode,
    controllers: [Controller; 2],
    history: Vec<usize>,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Game for `mode`, engine side (if any) using an entropy-seeded selector
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self::with_controllers(mode, Self::mode_controllers(mode, MoveSelector::new(difficulty)))
    }

    /// Game for `mode` with a reproducible engine
    pub fn with_seed(mode: GameMode, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_controllers(
            mode,
            Self::mode_controllers(mode, MoveSelector::with_seed(difficulty, seed)),
        )
    }

    /// Game with explicit controllers for sides A and B.
    ///
    /// If side A is engine-controlled its opening move is played immediately.
    pub fn with_controllers(mode: GameMode, controllers: [Controller; 2]) -> Self {
        let mut game = Self {
            board: Board::new(),
            phase: TurnPhase::AwaitingMove(Side::A),
            mode,
            controllers,
            history: Vec::with_capacity(BOARD_SIZE),
        };
        game.play_engine_turns();
        game
    }

    fn mode_controllers(mode: GameMode, engine: MoveSelector) -> [Controller; 2] {
        match mode.engine_side() {
            None => [Controller::Human, Controller::Human],
            Some(Side::A) => [Controller::Engine(engine), Controller::Human],
            Some(Side::B) => [Controller::Human, Controller::Engine(engine)],
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current result (`InProgress` until game over)
    pub fn result(&self) -> GameResult {
        match self.phase {
            TurnPhase::GameOver(result) => result,
            _ => GameResult::InProgress,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::GameOver(_))
    }

    /// Side to move, `None` once the game is over
    pub fn active_side(&self) -> Option<Side> {
        match self.phase {
            TurnPhase::AwaitingMove(side) => Some(side),
            _ => None,
        }
    }

    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn controller(&self, side: Side) -> &Controller {
        &self.controllers[side_index(side)]
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.board,
            active_side: self.active_side(),
            status: self.result(),
            winning_line: self.board.winning_line().map(|(_, line)| line),
            moves: self.history.clone(),
            mode: self.mode,
        }
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Apply a move for the side to move, then let the engine answer.
    ///
    /// Rejected moves leave the game untouched.
    pub fn apply_move(&mut self, index: usize) -> Result<BoardSnapshot> {
        self.submit(index)?;
        self.play_engine_turns();
        Ok(self.snapshot())
    }

    /// Return to an empty board with side A to move
    pub fn reset(&mut self) {
        debug!(mode = %self.mode, "Resetting game");
        self.board = Board::new();
        self.phase = TurnPhase::AwaitingMove(Side::A);
        self.history.clear();
        self.play_engine_turns();
    }

    /// Validate, write, evaluate. The only path that touches the board.
    fn submit(&mut self, index: usize) -> Result<()> {
        let side = match self.phase {
            TurnPhase::AwaitingMove(side) => side,
            TurnPhase::GameOver(_) => return Err(Error::GameAlreadyOver),
            // Only held between the write and the evaluator below, so no
            // caller can submit into it
            TurnPhase::Evaluating => {
                debug_assert!(false, "move submitted while evaluating");
                return Err(Error::GameAlreadyOver);
            }
        };

        if index >= BOARD_SIZE {
            return Err(Error::IllegalMove {
                index,
                reason: IllegalReason::OutOfRange,
            });
        }
        if !self.board.is_empty_at(index) {
            return Err(Error::IllegalMove {
                index,
                reason: IllegalReason::Occupied,
            });
        }

        self.board.place(index, side);
        self.history.push(index);
        self.phase = TurnPhase::Evaluating;
        debug!(%side, cell = index, "Move applied");

        self.phase = match evaluate(&self.board) {
            GameResult::InProgress => TurnPhase::AwaitingMove(side.opponent()),
            result => {
                info!(?result, moves = self.history.len(), "Game over");
                TurnPhase::GameOver(result)
            }
        };
        Ok(())
    }

    /// Play engine moves while an engine-controlled side is to move
    fn play_engine_turns(&mut self) {
        while let TurnPhase::AwaitingMove(side) = self.phase {
            let board = self.board;
            let choice = match &mut self.controllers[side_index(side)] {
                Controller::Human => return,
                Controller::Engine(selector) => selector.select_move(&board, side),
            };

            let Some(cell) = choice else { return };
            debug!(%side, cell, "Engine chose cell");
            if let Err(e) = self.submit(cell) {
                // Selector only offers empty cells
                warn!(%side, cell, error = %e, "Engine move rejected");
                debug_assert!(false, "engine chose an illegal cell: {}", e);
                return;
            }
        }
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::A => 0,
        Side::B => 1,
    }
}
