//! Headless stand-in for the host's eye-close and scene reload effect.

use std::cell::RefCell;
use std::rc::Rc;

use gloaming_cycle::{EyeTransition, Outcome, ResetEffect};
use tracing::info;

#[derive(Debug, Clone, Copy)]
struct PendingReset {
    outcome: Outcome,
    remaining: f64,
}

/// Counts down the eye transition and reports when the scene should reload.
///
/// The clock owns the [`ResetEffect`] half (see [`effect`](Self::effect));
/// the session keeps this handle and polls it every tick.
#[derive(Debug, Clone, Default)]
pub struct ResetHandle {
    pending: Rc<RefCell<Option<PendingReset>>>,
}

impl ResetHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The half handed to the clock.
    pub fn effect(&self) -> HeadlessReset {
        HeadlessReset {
            pending: Rc::clone(&self.pending),
        }
    }

    /// Whether an eye transition is running.
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Count down `dt` seconds. Returns the outcome once the reload is due.
    pub fn advance(&self, dt: f64) -> Option<Outcome> {
        let mut pending = self.pending.borrow_mut();
        let reset = pending.as_mut()?;
        reset.remaining -= dt;
        if reset.remaining > 0.0 {
            return None;
        }

        let outcome = reset.outcome;
        *pending = None;
        info!(?outcome, "eyes closed, reloading scene");
        Some(outcome)
    }
}

/// [`ResetEffect`] that records the transition for its [`ResetHandle`].
pub struct HeadlessReset {
    pending: Rc<RefCell<Option<PendingReset>>>,
}

impl ResetEffect for HeadlessReset {
    fn begin_reset(&mut self, outcome: Outcome, transition: EyeTransition) {
        info!(
            ?outcome,
            close = transition.close_seconds,
            reopen_delay = transition.reopen_delay_seconds,
            post_close_delay = transition.post_close_delay_seconds,
            "closing eyes"
        );
        *self.pending.borrow_mut() = Some(PendingReset {
            outcome,
            remaining: transition.reload_after(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_due_after_close_and_post_delay() {
        let handle = ResetHandle::new();
        assert_eq!(handle.advance(100.0), None);

        handle.effect().begin_reset(Outcome::Loss, EyeTransition::LOSS);
        assert!(handle.is_pending());
        assert_eq!(handle.advance(9.5), None);
        assert_eq!(handle.advance(0.5), Some(Outcome::Loss));
        assert!(!handle.is_pending());
        assert_eq!(handle.advance(1.0), None);
    }
}
