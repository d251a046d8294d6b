use serde::{Deserialize, Serialize};

use crate::engine::config::DifficultyConfig;
use crate::engine::error::EngineError;

pub const POINTS_FOUNDATION: i32 = 10;
pub const POINTS_TABLEAU: i32 = 5;
pub const POINTS_REVEAL: i32 = 5;
pub const PENALTY_RECYCLE: i32 = -20;
pub const PENALTY_INVALID_MOVE: i32 = -5;

const MOVES_BONUS_CEILING: i64 = 500;

/// Counters a session accumulates between deal and game end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: f64,
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub hints_used: u32,
    pub hints_remaining: u32,
    pub is_game_over: bool,
    pub is_game_won: bool,
    pub final_score: Option<FinalScore>,
}

/// Breakdown of the one-time score recomputation on a win.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub running: f64,
    pub time_bonus: u32,
    pub moves_bonus: u32,
    pub difficulty_bonus: u32,
    pub total: f64,
}

impl SessionState {
    pub fn new(config: &DifficultyConfig) -> Self {
        Self {
            score: 0.0,
            moves: 0,
            elapsed_seconds: 0,
            hints_used: 0,
            hints_remaining: config.hints_allowed,
            is_game_over: false,
            is_game_won: false,
            final_score: None,
        }
    }

    /// Score as shown to players.
    pub fn display_score(&self) -> i64 {
        self.score.floor() as i64
    }

    pub(crate) fn adjust_score(&mut self, points: i32, config: &DifficultyConfig) {
        let delta = f64::from(points) * config.score_multiplier;
        self.score = (self.score + delta).max(0.0);
    }

    pub(crate) fn record_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    pub(crate) fn consume_hint(&mut self) -> Result<u32, EngineError> {
        if self.hints_remaining == 0 {
            return Err(EngineError::NoHintsRemaining);
        }
        self.hints_remaining -= 1;
        self.hints_used = self.hints_used.saturating_add(1);
        Ok(self.hints_remaining)
    }

    /// Marks the game won and folds the bonuses in. Later calls return
    /// `None` and leave the score alone.
    pub(crate) fn finish_won(&mut self, config: &DifficultyConfig) -> Option<FinalScore> {
        if self.is_game_won {
            return None;
        }
        let breakdown = final_score(self.score, self.elapsed_seconds, self.moves, config);
        self.score = breakdown.total;
        self.final_score = Some(breakdown);
        self.is_game_won = true;
        self.is_game_over = true;
        Some(breakdown)
    }

    /// Advances the clock one second. Returns true when this tick ran the
    /// clock out.
    pub(crate) fn advance_clock(&mut self, config: &DifficultyConfig) -> bool {
        if self.is_game_over {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        match config.time_limit_seconds {
            Some(limit) if self.elapsed_seconds >= limit => {
                self.is_game_over = true;
                true
            }
            _ => false,
        }
    }
}

pub fn final_score(
    running: f64,
    elapsed_seconds: u32,
    moves: u32,
    config: &DifficultyConfig,
) -> FinalScore {
    let time_bonus = config
        .time_limit_seconds
        .map(|limit| (i64::from(limit) - i64::from(elapsed_seconds)).max(0) * 2)
        .unwrap_or(0);
    let moves_bonus = (MOVES_BONUS_CEILING - i64::from(moves) * 2).max(0);
    let time_bonus = u32::try_from(time_bonus).unwrap_or(u32::MAX);
    let moves_bonus = u32::try_from(moves_bonus).unwrap_or(0);

    FinalScore {
        running,
        time_bonus,
        moves_bonus,
        difficulty_bonus: config.difficulty_bonus,
        total: running
            + f64::from(time_bonus)
            + f64::from(moves_bonus)
            + f64::from(config.difficulty_bonus),
    }
}
