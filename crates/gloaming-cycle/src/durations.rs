//! Per-phase duration table.

use rand::Rng;

use crate::error::CycleError;
use crate::phase::Phase;

/// How long each phase lasts, in seconds, indexed by [`Phase::index`].
///
/// Start and End are always `f64::INFINITY`, whatever the source table says,
/// so they never transition on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseDurations {
    seconds: [f64; Phase::COUNT],
}

impl PhaseDurations {
    /// Build the table from one entry per phase.
    ///
    /// Fails if `lengths` does not have exactly [`Phase::COUNT`] entries.
    pub fn new(lengths: &[f64]) -> Result<Self, CycleError> {
        let seconds: [f64; Phase::COUNT] =
            lengths.try_into().map_err(|_| CycleError::DurationTableMismatch {
                expected: Phase::COUNT,
                actual: lengths.len(),
            })?;

        let mut durations = Self { seconds };
        durations.pin_unbounded();
        Ok(durations)
    }

    /// Every bounded phase lasts `seconds`.
    pub fn uniform(seconds: f64) -> Self {
        let mut durations = Self {
            seconds: [seconds; Phase::COUNT],
        };
        durations.pin_unbounded();
        durations
    }

    /// Replace every bounded phase length with a uniform draw from `[min, max]`.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        min: f64,
        max: f64,
    ) -> Result<(), CycleError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(CycleError::InvalidRandomRange { min, max });
        }

        for seconds in &mut self.seconds {
            *seconds = rng.gen_range(min..=max);
        }
        self.pin_unbounded();
        Ok(())
    }

    /// Length of `phase` in seconds.
    pub fn get(&self, phase: Phase) -> f64 {
        self.seconds[phase.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.seconds
    }

    fn pin_unbounded(&mut self) {
        for phase in Phase::ALL.into_iter().filter(|p| p.is_unbounded()) {
            self.seconds[phase.index()] = f64::INFINITY;
        }
    }
}
