//! Game-over outcomes and the host reset effect.

use serde::{Deserialize, Serialize};

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The day reached [`Phase::End`](crate::Phase::End).
    Win,
    /// An external death signal arrived first.
    Loss,
}

/// Timing of the eye-close effect that precedes a scene reload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeTransition {
    /// Seconds for the eyes to close.
    pub close_seconds: f64,
    /// Seconds the eyes stay shut in the reloaded scene before reopening.
    pub reopen_delay_seconds: f64,
    /// Seconds to wait after closing before the scene reloads.
    pub post_close_delay_seconds: f64,
}

impl EyeTransition {
    /// Slow fade used when the night is survived.
    pub const WIN: Self = Self {
        close_seconds: 5.0,
        reopen_delay_seconds: 30.0,
        post_close_delay_seconds: 5.0,
    };

    /// Quick cut used on death.
    pub const LOSS: Self = Self {
        close_seconds: 2.0,
        reopen_delay_seconds: 7.0,
        post_close_delay_seconds: 8.0,
    };

    /// Seconds from the start of the effect until the reload is due.
    pub fn reload_after(&self) -> f64 {
        self.close_seconds + self.post_close_delay_seconds
    }
}

impl Default for EyeTransition {
    fn default() -> Self {
        Self::LOSS
    }
}

/// Host-side effect that closes the eyes and reloads the scene.
///
/// Invoked at most once per clock, from the game-over path.
pub trait ResetEffect {
    fn begin_reset(&mut self, outcome: Outcome, transition: EyeTransition);
}
