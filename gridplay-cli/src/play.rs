//! Play command - interactive terminal game through the engine session
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session(), play_game()
//! - Level 3: read_command(), announce_result()
//! - Level 4: formatting utilities

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use gridplay_core::{
    BoardSnapshot, Difficulty, GameMode, GameResult, Session, SessionStats, Settings, Side,
    TRACKED_SIDE,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game mode (human-vs-ai, human-vs-human, ...)
    #[arg(long)]
    pub mode: Option<GameMode>,

    /// Engine difficulty (easy, medium, hard, expert)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Pause before showing the engine's move, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Cell(usize),
    Quit,
}

/// Session options after flags are applied over settings
struct PlayOptions {
    mode: GameMode,
    difficulty: Difficulty,
    delay: Duration,
    player_name: String,
    opponent_name: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Merge flags over settings
/// 2. Play games until the player quits
/// 3. Print statistics and badges
pub fn run(args: PlayArgs, settings: Settings) -> Result<()> {
    let options = PlayOptions {
        mode: args.mode.unwrap_or(settings.mode),
        difficulty: args.difficulty.unwrap_or(settings.difficulty),
        delay: Duration::from_millis(args.delay_ms.unwrap_or(settings.ai_delay_ms)),
        player_name: settings.player_name.clone(),
        opponent_name: settings.opponent_name.clone(),
    };
    tracing::info!(mode = %options.mode, difficulty = %options.difficulty, "Starting play session");

    let mut session = Session::from_settings(&settings);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    play_session(&mut session, &options, &mut input, &mut output)?;
    print_summary(&session, &mut output)?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play consecutive games until the player declines another
fn play_session<R: BufRead, W: Write>(
    session: &mut Session,
    options: &PlayOptions,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        let finished = play_game(session, options, input, output)?;
        if !finished {
            return Ok(());
        }
        write!(output, "Play again? [y/N] ")?;
        output.flush()?;
        match read_line(input)? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

/// Play one game. Returns false when the player quit midway.
fn play_game<R: BufRead, W: Write>(
    session: &mut Session,
    options: &PlayOptions,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let handle = session.new_game(options.mode, options.difficulty);
    let mut snapshot = session.snapshot(handle)?;
    writeln!(output, "\n{}\n", snapshot.board)?;

    while let Some(side) = snapshot.active_side {
        write!(output, "{} ({}), pick a cell 1-9 or q to quit: ", name_for(side, options), side.symbol())?;
        output.flush()?;

        let cell = match read_command(input)? {
            None | Some(Command::Quit) => {
                session.end_game(handle)?;
                return Ok(false);
            }
            Some(Command::Cell(cell)) => cell,
        };

        let played = snapshot.moves.len();
        snapshot = match session.apply_move(handle, cell) {
            Ok(next) => next,
            Err(e) if e.is_illegal_move() => {
                writeln!(output, "That cell can't be used ({}). Try another.", e)?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if snapshot.moves.len() > played + 1 {
            writeln!(output, "{} is thinking...", options.opponent_name)?;
            output.flush()?;
            thread::sleep(options.delay);
        }
        writeln!(output, "\n{}\n", snapshot.board)?;
    }

    announce_result(&snapshot, options, output)?;
    Ok(true)
}

/// Print statistics and earned badges
fn print_summary<W: Write>(session: &Session, output: &mut W) -> Result<()> {
    let stats = session.statistics();
    writeln!(output, "\n{}", format_stats(&stats))?;

    let badges = session.badges();
    if badges.is_empty() {
        writeln!(output, "No badges yet. Keep playing!")?;
    } else {
        writeln!(output, "Badges:")?;
        for badge in badges {
            writeln!(output, "  * {} - {}", badge.title(), badge.description())?;
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Read the next command, skipping unreadable lines. `None` on end of input.
fn read_command<R: BufRead>(input: &mut R) -> Result<Option<Command>> {
    while let Some(line) = read_line(input)? {
        if let Some(command) = parse_command(&line) {
            return Ok(Some(command));
        }
    }
    Ok(None)
}

fn announce_result<W: Write>(snapshot: &BoardSnapshot, options: &PlayOptions, output: &mut W) -> Result<()> {
    match snapshot.status {
        GameResult::Win(side) if options.mode == GameMode::HumanVsHuman => {
            writeln!(output, "{} wins!", side.symbol())?
        }
        GameResult::Win(side) if side == TRACKED_SIDE => {
            writeln!(output, "You win, {}!", options.player_name)?
        }
        GameResult::Win(_) => writeln!(output, "{} wins this time.", options.opponent_name)?,
        GameResult::Draw => writeln!(output, "It's a draw!")?,
        GameResult::InProgress => {}
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Cells are numbered 1-9 for players, row by row
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Some(Command::Quit);
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=9).contains(&n) => Some(Command::Cell(n - 1)),
        _ => None,
    }
}

fn name_for(side: Side, options: &PlayOptions) -> &str {
    match (side, options.mode) {
        (Side::A, _) => &options.player_name,
        (Side::B, GameMode::HumanVsHuman) => "Player 2",
        (Side::B, _) => &options.opponent_name,
    }
}

fn format_stats(stats: &SessionStats) -> String {
    format!(
        "Games: {}  Wins: {}  Losses: {}  Draws: {}  Best streak: {}  Win rate: {:.0}%",
        stats.total_games,
        stats.wins,
        stats.losses,
        stats.draws,
        stats.best_streak,
        stats.win_rate() * 100.0
    )
}

// ============================================================================
// TESTS
// ============================================================================
