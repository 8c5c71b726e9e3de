//! Fixed-timestep host tick implementing the "Fix Your Timestep" pattern.
//!
//! Frame times are fed in explicitly, so the same loop drives both the
//! wall-clock mode and the flat-out headless mode deterministically.

use tracing::warn;

/// Accumulator that turns variable frame times into fixed simulation steps.
pub struct GameLoop {
    fixed_dt: f64,
    max_frame_time: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// `fixed_dt` seconds per step; frames longer than `max_frame_time` are
    /// clamped to prevent a spiral of death.
    pub fn new(fixed_dt: f64, max_frame_time: f64) -> Self {
        Self {
            fixed_dt,
            max_frame_time,
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// `update_fn(fixed_dt, total_sim_time)` is called zero or more times at
    /// the fixed rate. Returns the number of steps taken.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                self.max_frame_time * 1000.0
            );
            frame_time = self.max_frame_time;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt, self.total_sim_time);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
            steps += 1;
        }

        self.frame_count += 1;
        steps
    }

    /// Fraction of a step left in the accumulator, in `[0.0, 1.0)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Returns the total number of frames fed in.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation update steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Returns the total simulation time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn sixty_hz() -> GameLoop {
        GameLoop::new(DT, 0.25)
    }

    #[test]
    fn test_accumulator_single_step() {
        let mut loop_ = sixty_hz();
        let mut updates = 0u32;
        loop_.tick(DT, |_, _| updates += 1);
        assert_eq!(updates, 1);
        assert!(loop_.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut loop_ = sixty_hz();
        let steps = loop_.tick(3.0 * DT + 1e-9, |_, _| {});
        assert_eq!(steps, 3);
        assert!((loop_.total_sim_time() - 3.0 * DT).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_partial() {
        let mut loop_ = sixty_hz();
        let steps = loop_.tick(0.5 * DT, |_, _| {});
        assert_eq!(steps, 0);
        assert!((loop_.alpha() - 0.5).abs() < 1e-10);
        assert_eq!(loop_.frame_count(), 1);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = sixty_hz();
        let steps = loop_.tick(1.0, |_, _| {});
        let max_updates = (0.25 / DT).ceil() as u32;
        assert!(steps <= max_updates, "Expected at most {max_updates}, got {steps}");
        assert!(steps > 0);
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut loop_ = sixty_hz();
        assert_eq!(loop_.tick(-1.0, |_, _| {}), 0);
        assert_eq!(loop_.alpha(), 0.0);
    }

    #[test]
    fn test_sim_time_passed_to_update() {
        let mut loop_ = GameLoop::new(0.5, 10.0);
        let mut seen = Vec::new();
        loop_.tick(2.0, |dt, t| seen.push((dt, t)));
        assert_eq!(seen, vec![(0.5, 0.0), (0.5, 0.5), (0.5, 1.0), (0.5, 1.5)]);
        assert_eq!(loop_.fixed_dt(), 0.5);
        assert_eq!(loop_.update_count(), 4);
    }
}
