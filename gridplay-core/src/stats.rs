//! Session statistics and achievement badges

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Side};
use crate::eval::GameResult;

/// Marks on the board after the fastest possible win
const PERFECT_GAME_MARKS: usize = 3;

/// Result of a finished game from the tracked player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Map a terminal result onto `tracked`'s perspective, `None` while in progress
    pub fn from_result(result: GameResult, tracked: Side) -> Option<Self> {
        match result {
            GameResult::InProgress => None,
            GameResult::Draw => Some(Outcome::Draw),
            GameResult::Win(side) if side == tracked => Some(Outcome::Win),
            GameResult::Win(_) => Some(Outcome::Loss),
        }
    }
}

/// Counters for one session. Mutated once per completed game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub perfect_games: u32,
    pub tournaments_won: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed game. Draws leave the streak untouched.
    pub fn record_game_result(&mut self, outcome: Outcome) -> &Self {
        self.total_games += 1;
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            Outcome::Loss => {
                self.losses += 1;
                self.current_streak = 0;
            }
            Outcome::Draw => {
                self.draws += 1;
            }
        }
        debug!(?outcome, total = self.total_games, streak = self.current_streak, "Recorded game");
        self
    }

    /// Record a finished game from its final board, counting perfect wins.
    ///
    /// Returns `None` (and records nothing) if the board is still in play.
    pub fn record_finished_board(
        &mut self,
        result: GameResult,
        board: &Board,
        tracked: Side,
    ) -> Option<Outcome> {
        let outcome = Outcome::from_result(result, tracked)?;
        if outcome == Outcome::Win && board.count(tracked) == PERFECT_GAME_MARKS {
            self.perfect_games += 1;
        }
        self.record_game_result(outcome);
        Some(outcome)
    }

    pub fn record_tournament_win(&mut self) {
        self.tournaments_won += 1;
    }

    /// Fraction of games won, 0 before any game
    pub fn win_rate(&self) -> f32 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins as f32 / self.total_games as f32
        }
    }

    /// Badges earned by this snapshot, in `Badge::ALL` order
    pub fn badges(&self) -> Vec<Badge> {
        Badge::ALL.into_iter().filter(|b| b.is_earned(self)).collect()
    }
}

// ============================================================================
// BADGES
// ============================================================================

/// Achievement derived from statistics. Never stored; recomputed on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstWin,
    HatTrick,
    OnFire,
    Unstoppable,
    Flawless,
    Champion,
    Dedicated,
    Peacekeeper,
}

impl Badge {
    pub const ALL: [Badge; 8] = [
        Badge::FirstWin,
        Badge::HatTrick,
        Badge::OnFire,
        Badge::Unstoppable,
        Badge::Flawless,
        Badge::Champion,
        Badge::Dedicated,
        Badge::Peacekeeper,
    ];

    pub fn is_earned(self, stats: &SessionStats) -> bool {
        match self {
            Badge::FirstWin => stats.wins >= 1,
            Badge::HatTrick => stats.best_streak >= 3,
            Badge::OnFire => stats.best_streak >= 5,
            Badge::Unstoppable => stats.best_streak >= 10,
            Badge::Flawless => stats.perfect_games >= 1,
            Badge::Champion => stats.tournaments_won >= 1,
            Badge::Dedicated => stats.total_games >= 10,
            Badge::Peacekeeper => stats.draws >= 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Badge::FirstWin => "First Victory",
            Badge::HatTrick => "Hat Trick",
            Badge::OnFire => "On Fire",
            Badge::Unstoppable => "Unstoppable",
            Badge::Flawless => "Flawless",
            Badge::Champion => "Champion",
            Badge::Dedicated => "Dedicated Player",
            Badge::Peacekeeper => "Peacekeeper",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Badge::FirstWin => "Win your first game",
            Badge::HatTrick => "Win 3 games in a row",
            Badge::OnFire => "Win 5 games in a row",
            Badge::Unstoppable => "Win 10 games in a row",
            Badge::Flawless => "Win using only three marks",
            Badge::Champion => "Win a tournament",
            Badge::Dedicated => "Play 10 games",
            Badge::Peacekeeper => "Draw 5 games",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_all(stats: &mut SessionStats, outcomes: &[Outcome]) {
        for &o in outcomes {
            stats.record_game_result(o);
        }
    }

    #[test]
    fn test_streak_sequence() {
        let mut stats = SessionStats::new();
        record_all(&mut stats, &[Outcome::Win, Outcome::Win, Outcome::Loss, Outcome::Win]);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.total_games, 4);
    }

    #[test]
    fn test_draw_keeps_streak() {
        let mut stats = SessionStats::new();
        record_all(&mut stats, &[Outcome::Win, Outcome::Draw, Outcome::Win]);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.total_games, 3);
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(Outcome::from_result(GameResult::Win(Side::A), Side::A), Some(Outcome::Win));
        assert_eq!(Outcome::from_result(GameResult::Win(Side::B), Side::A), Some(Outcome::Loss));
        assert_eq!(Outcome::from_result(GameResult::Draw, Side::B), Some(Outcome::Draw));
        assert_eq!(Outcome::from_result(GameResult::InProgress, Side::A), None);
    }

    #[test]
    fn test_perfect_game_counted() {
        let mut stats = SessionStats::new();
        let fast = Board::parse("XXX OO. ...").unwrap();
        assert_eq!(
            stats.record_finished_board(GameResult::Win(Side::A), &fast, Side::A),
            Some(Outcome::Win)
        );
        let slow = Board::parse("XXX OOX O..").unwrap();
        stats.record_finished_board(GameResult::Win(Side::A), &slow, Side::A);
        assert_eq!(stats.perfect_games, 1);
        assert_eq!(stats.wins, 2);
    }

    #[test]
    fn test_in_progress_not_recorded() {
        let mut stats = SessionStats::new();
        let board = Board::parse("X........").unwrap();
        assert_eq!(stats.record_finished_board(GameResult::InProgress, &board, Side::A), None);
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn test_badges_derived() {
        let mut stats = SessionStats::new();
        assert!(stats.badges().is_empty());

        stats.record_game_result(Outcome::Win);
        assert_eq!(stats.badges(), vec![Badge::FirstWin]);

        record_all(&mut stats, &[Outcome::Win, Outcome::Win]);
        assert!(stats.badges().contains(&Badge::HatTrick));
        assert!(!stats.badges().contains(&Badge::OnFire));

        // Losing keeps badges earned from the best streak
        stats.record_game_result(Outcome::Loss);
        assert!(stats.badges().contains(&Badge::HatTrick));

        stats.record_tournament_win();
        assert!(stats.badges().contains(&Badge::Champion));
    }

    #[test]
    fn test_streak_badges() {
        let mut stats = SessionStats::new();
        record_all(&mut stats, &[Outcome::Win; 10]);
        let badges = stats.badges();
        assert!(badges.contains(&Badge::OnFire));
        assert!(badges.contains(&Badge::Unstoppable));
        assert!(badges.contains(&Badge::Dedicated));
    }

    #[test]
    fn test_win_rate() {
        let mut stats = SessionStats::new();
        assert_eq!(stats.win_rate(), 0.0);
        record_all(&mut stats, &[Outcome::Win, Outcome::Loss, Outcome::Draw, Outcome::Win]);
        assert!((stats.win_rate() - 0.5).abs() < 1e-6);
    }
}
