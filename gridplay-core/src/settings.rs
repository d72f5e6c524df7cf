//! Engine settings loaded from JSON

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::game::GameMode;

/// Defaults for new games. Missing fields in a settings file fall back to
/// `Settings::default()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Base seed for engine players (None = entropy)
    pub seed: Option<u64>,
    /// Pause before showing an engine move. Display only.
    pub ai_delay_ms: u64,
    pub player_name: String,
    pub opponent_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::HumanVsAi,
            difficulty: Difficulty::Easy,
            seed: None,
            ai_delay_ms: 600,
            player_name: "Player".to_string(),
            opponent_name: "Robo".to_string(),
        }
    }
}

impl Settings {
    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        Ok(settings)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode, GameMode::HumanVsAi);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"difficulty": "hard", "seed": 7}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.mode, GameMode::HumanVsAi);
        assert_eq!(settings.player_name, "Player");
    }

    #[test]
    fn test_unknown_difficulty_fails() {
        let parsed = serde_json::from_str::<Settings>(r#"{"difficulty": "godlike"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("gridplay-settings-{}.json", std::process::id()));
        let settings = Settings {
            mode: GameMode::HumanVsHuman,
            difficulty: Difficulty::Medium,
            seed: Some(3),
            ai_delay_ms: 0,
            player_name: "Ada".to_string(),
            opponent_name: "Grace".to_string(),
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/gridplay.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings"));
    }
}
