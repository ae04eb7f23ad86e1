//! Text overlay snapshot
//!
//! Read-only view of the round for the presentation layer.

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Lines drawn over the scene each frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudText {
    /// Countdown (`MM:SS`) while playing, final score once ended
    pub headline: String,
    /// "Score" once ended
    pub title: String,
    /// Controls hint or end-of-round summary
    pub explain: String,
}

impl HudText {
    pub fn from_state(state: &GameState) -> Self {
        if let Some(result) = state.result {
            return Self {
                headline: result.score.to_string(),
                title: "Score".to_string(),
                explain: format!(
                    "{} skulls left, resurrect {} vampires",
                    result.remaining_lives, result.saved_coffins
                ),
            };
        }

        let explain = match state.phase {
            GamePhase::Intro => String::new(),
            _ => "Use WASD to cover the coffins".to_string(),
        };
        Self {
            headline: state.timer.countdown(),
            title: String::new(),
            explain,
        }
    }
}
