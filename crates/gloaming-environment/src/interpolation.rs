//! Resumable lighting cross-fade.
//!
//! A [`LightingTransition`] is stepped once per host tick with the clock's
//! elapsed-time-in-phase. It yields a blended snapshot while
//! `elapsed < window` and finishes silently afterwards. There is no final
//! snap to the target: the last applied frame is the last one with
//! `t < 1`.

use crate::snapshot::LightingSnapshot;

/// Portion of a phase over which its entering lighting fade is spread.
pub const TRANSITION_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct LightingTransition {
    start: LightingSnapshot,
    target: LightingSnapshot,
    window: f64,
    finished: bool,
}

impl LightingTransition {
    /// Fade from `start` to `target` over `phase_duration * fraction` seconds.
    pub fn new(
        start: LightingSnapshot,
        target: LightingSnapshot,
        phase_duration: f64,
        fraction: f64,
    ) -> Self {
        Self {
            start,
            target,
            window: phase_duration * fraction,
            finished: false,
        }
    }

    /// Blend for `elapsed` seconds into the phase, or `None` once done.
    ///
    /// A window that is zero, negative or NaN finishes on the first step
    /// without producing anything.
    pub fn step(&mut self, elapsed: f64) -> Option<LightingSnapshot> {
        if self.finished {
            return None;
        }
        // Written so that a NaN window also lands here.
        if !(elapsed < self.window) {
            self.finished = true;
            return None;
        }

        let t = (elapsed / self.window).max(0.0) as f32;
        Some(self.start.lerp(&self.target, t))
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    pub fn start(&self) -> &LightingSnapshot {
        &self.start
    }

    pub fn target(&self) -> &LightingSnapshot {
        &self.target
    }
}
