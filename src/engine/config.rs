use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

pub use crate::game::DrawMode;

/// Ruleset for one session. Fixed from deal to game end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub draw_mode: DrawMode,
    #[serde(default)]
    pub time_limit_seconds: Option<u32>,
    pub score_multiplier: f64,
    pub hints_allowed: u32,
    pub move_penalty_enabled: bool,
    #[serde(default)]
    pub difficulty_bonus: u32,
}

impl DifficultyConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.score_multiplier.is_finite() || self.score_multiplier <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "score multiplier must be a positive number, got {}",
                self.score_multiplier
            )));
        }
        if self.time_limit_seconds == Some(0) {
            return Err(EngineError::InvalidConfig(
                "time limit must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Difficulty::Easy.config()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "easy" => Some(Self::Easy),
            "normal" => Some(Self::Normal),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    pub fn bonus(self) -> u32 {
        match self {
            Self::Easy => 0,
            Self::Normal => 500,
            Self::Hard => 1000,
        }
    }

    pub fn config(self) -> DifficultyConfig {
        match self {
            Self::Easy => DifficultyConfig {
                draw_mode: DrawMode::One,
                time_limit_seconds: None,
                score_multiplier: 1.0,
                hints_allowed: 999,
                move_penalty_enabled: false,
                difficulty_bonus: self.bonus(),
            },
            Self::Normal => DifficultyConfig {
                draw_mode: DrawMode::Three,
                time_limit_seconds: None,
                score_multiplier: 1.5,
                hints_allowed: 3,
                move_penalty_enabled: true,
                difficulty_bonus: self.bonus(),
            },
            Self::Hard => DifficultyConfig {
                draw_mode: DrawMode::Three,
                time_limit_seconds: Some(600),
                score_multiplier: 2.0,
                hints_allowed: 0,
                move_penalty_enabled: true,
                difficulty_bonus: self.bonus(),
            },
        }
    }
}

impl From<Difficulty> for DifficultyConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}
