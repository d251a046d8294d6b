use crate::engine::controller::GameState;

/// `m:ss`, minutes unpadded.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn clock_text(state: &GameState) -> String {
    let elapsed = format_clock(state.session.elapsed_seconds);
    match state.config.time_limit_seconds {
        Some(limit) => format!("{elapsed} / {}", format_clock(limit)),
        None => elapsed,
    }
}

pub fn build_status_text(state: &GameState) -> String {
    let session = &state.session;
    if session.is_game_won {
        return format!(
            "You won! Final score {} in {} moves.",
            session.display_score(),
            session.moves
        );
    }
    if session.is_game_over {
        return format!("Game over! Time ran out at {}.", clock_text(state));
    }
    if let Some(reason) = state.last_outcome.rejection() {
        return format!("Invalid move: {}.", reason.describe());
    }
    format!(
        "Score: {}  Time: {}  Moves: {}",
        session.display_score(),
        clock_text(state),
        session.moves
    )
}
