//! The phase clock: a forward-only state machine over [`Phase`].

use tracing::{debug, info, warn};

use crate::durations::PhaseDurations;
use crate::events::{PhaseContext, PhaseEvent, PhaseEvents};
use crate::game_over::{EyeTransition, Outcome, ResetEffect};
use crate::phase::Phase;

/// Owns the current phase and the time spent in it.
///
/// Call [`start`](Self::start) once after wiring subscribers, then
/// [`advance`](Self::advance) once per host tick. Every transition fires
/// `Unloaded(old)` then `Loaded(new)` synchronously. Loading [`Phase::End`]
/// ends the game with [`Outcome::Win`]; after any game over the clock is
/// frozen for good.
pub struct PhaseClock {
    phase: Phase,
    elapsed: f64,
    durations: PhaseDurations,
    events: PhaseEvents,
    started: bool,
    frozen: bool,
    outcome: Option<Outcome>,
    win_transition: EyeTransition,
    loss_transition: EyeTransition,
    reset: Option<Box<dyn ResetEffect>>,
}

impl PhaseClock {
    /// A clock sitting at the beginning of [`Phase::Start`].
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            phase: Phase::Start,
            elapsed: 0.0,
            durations,
            events: PhaseEvents::new(),
            started: false,
            frozen: false,
            outcome: None,
            win_transition: EyeTransition::WIN,
            loss_transition: EyeTransition::LOSS,
            reset: None,
        }
    }

    /// Attach the host effect invoked on game over.
    pub fn with_reset_effect(mut self, reset: Box<dyn ResetEffect>) -> Self {
        self.reset = Some(reset);
        self
    }

    /// Override the eye transitions used for each outcome.
    pub fn with_transitions(mut self, win: EyeTransition, loss: EyeTransition) -> Self {
        self.win_transition = win;
        self.loss_transition = loss;
        self
    }

    /// Subscriber registry. Subscribe before calling [`start`](Self::start).
    pub fn events_mut(&mut self) -> &mut PhaseEvents {
        &mut self.events
    }

    /// Fire the initial `Loaded(Start)`. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(phase = %self.phase, "day cycle started");
        let ctx = self.context();
        self.events.dispatch(PhaseEvent::Loaded(self.phase), &ctx);
    }

    /// Accumulate `dt` seconds and transition at most once.
    ///
    /// Overshoot past the phase length is discarded: a `dt` spanning several
    /// phases still moves exactly one step. Returns whether a transition
    /// happened.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.frozen {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed >= self.durations.get(self.phase) {
            return self.transition();
        }
        false
    }

    /// Leave [`Phase::Start`] on an external trigger. No-op in any other phase.
    pub fn advance_past_start(&mut self) -> bool {
        if self.frozen || self.phase != Phase::Start {
            return false;
        }
        self.transition()
    }

    /// External death signal. Ends the game with [`Outcome::Loss`] unless it
    /// is already over.
    pub fn report_death(&mut self) {
        self.game_over(Outcome::Loss);
    }

    /// The single game-over path. Only the first call has any effect.
    ///
    /// On a loss, subscribers get `DeathByEnemy` before the reset effect runs.
    pub fn game_over(&mut self, outcome: Outcome) {
        if self.frozen {
            debug!(?outcome, "game already over, ignoring");
            return;
        }

        self.frozen = true;
        self.outcome = Some(outcome);
        warn!(?outcome, phase = %self.phase, elapsed = self.elapsed, "game over");

        let transition = match outcome {
            Outcome::Win => self.win_transition,
            Outcome::Loss => {
                let ctx = self.context();
                self.events.dispatch(PhaseEvent::DeathByEnemy, &ctx);
                self.loss_transition
            }
        };

        if let Some(reset) = self.reset.as_mut() {
            reset.begin_reset(outcome, transition);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds spent in the current phase.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Configured length of the current phase.
    pub fn current_duration(&self) -> f64 {
        self.durations.get(self.phase)
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Snapshot of the clock for subscribers and per-tick consumers.
    pub fn context(&self) -> PhaseContext {
        PhaseContext {
            phase: self.phase,
            elapsed: self.elapsed,
            duration: self.current_duration(),
        }
    }

    fn transition(&mut self) -> bool {
        let Some(next) = self.phase.next() else {
            return false;
        };

        info!(from = %self.phase, to = %next, "phase transition");
        self.elapsed = 0.0;

        let ctx = self.context();
        self.events.dispatch(PhaseEvent::Unloaded(self.phase), &ctx);

        self.phase = next;
        let ctx = self.context();
        self.events.dispatch(PhaseEvent::Loaded(next), &ctx);

        if next == Phase::End {
            self.game_over(Outcome::Win);
        }
        true
    }
}

impl std::fmt::Debug for PhaseClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseClock")
            .field("phase", &self.phase)
            .field("elapsed", &self.elapsed)
            .field("frozen", &self.frozen)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PhaseListener;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        log: Log,
    }

    impl PhaseListener for Recorder {
        fn on_phase_loaded(&mut self, phase: Phase, ctx: &PhaseContext) {
            assert_eq!(ctx.phase, phase);
            assert_eq!(ctx.elapsed, 0.0);
            self.log.borrow_mut().push(format!("load {phase}"));
        }

        fn on_phase_unloaded(&mut self, phase: Phase, _ctx: &PhaseContext) {
            self.log.borrow_mut().push(format!("unload {phase}"));
        }

        fn on_death_by_enemy(&mut self) {
            self.log.borrow_mut().push("death".to_string());
        }
    }

    struct RecordingReset {
        log: Log,
    }

    impl ResetEffect for RecordingReset {
        fn begin_reset(&mut self, outcome: Outcome, transition: EyeTransition) {
            self.log.borrow_mut().push(format!(
                "reset {outcome:?} {}",
                transition.close_seconds
            ));
        }
    }

    /// Clock over `[inf, 10, 10, 10, 10, 10, inf]` with a recorder subscribed.
    fn wired_clock() -> (PhaseClock, Rc<RefCell<Recorder>>, Log) {
        let log: Log = Rc::default();
        let durations = PhaseDurations::uniform(10.0);
        let mut clock = PhaseClock::new(durations)
            .with_reset_effect(Box::new(RecordingReset { log: log.clone() }));
        let recorder = Rc::new(RefCell::new(Recorder { log: log.clone() }));
        clock.events_mut().subscribe(&recorder);
        (clock, recorder, log)
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn test_start_fires_initial_load_once() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        clock.start();
        assert_eq!(take(&log), vec!["load Start"]);
    }

    #[test]
    fn test_start_never_auto_transitions() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        take(&log);

        for _ in 0..10_000 {
            assert!(!clock.advance(1_000.0));
        }
        assert_eq!(clock.phase(), Phase::Start);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn test_small_steps_transition_exactly_once_per_phase() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        clock.advance_past_start();
        take(&log);

        let mut transitions = 0;
        for _ in 0..110 {
            if clock.advance(0.1) {
                transitions += 1;
                assert_eq!(clock.elapsed(), 0.0);
            }
        }

        assert_eq!(transitions, 1);
        assert_eq!(clock.phase(), Phase::Dusk);
        assert_eq!(take(&log), vec!["unload Afternoon", "load Dusk"]);
    }

    #[test]
    fn test_overshoot_moves_a_single_step() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        clock.advance_past_start();
        take(&log);

        assert!(clock.advance(35.0));
        assert_eq!(clock.phase(), Phase::Dusk);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(take(&log), vec!["unload Afternoon", "load Dusk"]);
    }

    #[test]
    fn test_advance_past_start_only_works_in_start() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        take(&log);

        assert!(clock.advance_past_start());
        assert_eq!(clock.phase(), Phase::Afternoon);
        assert!(!clock.advance_past_start());
        assert_eq!(clock.phase(), Phase::Afternoon);
        assert_eq!(take(&log), vec!["unload Start", "load Afternoon"]);
    }

    #[test]
    fn test_reaching_end_wins_and_freezes() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        clock.advance_past_start();
        for _ in 0..5 {
            assert!(clock.advance(10.0));
        }

        assert_eq!(clock.phase(), Phase::End);
        assert_eq!(clock.outcome(), Some(Outcome::Win));
        assert!(clock.is_frozen());

        let log = take(&log);
        assert_eq!(log[log.len() - 2..], ["load End", "reset Win 5"]);
        assert!(!log.contains(&"death".to_string()));

        assert!(!clock.advance(1_000.0));
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_death_dispatches_before_reset() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        clock.advance_past_start();
        clock.advance(3.0);
        take(&log);

        clock.report_death();
        assert_eq!(take(&log), vec!["death", "reset Loss 2"]);
        assert_eq!(clock.outcome(), Some(Outcome::Loss));
        assert_eq!(clock.phase(), Phase::Afternoon);

        assert!(!clock.advance(100.0));
        assert_eq!(clock.elapsed(), 3.0);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let (mut clock, _recorder, log) = wired_clock();
        clock.start();
        clock.report_death();
        take(&log);

        clock.report_death();
        clock.game_over(Outcome::Win);
        assert!(take(&log).is_empty());
        assert_eq!(clock.outcome(), Some(Outcome::Loss));
        assert!(!clock.advance_past_start());
    }

    #[test]
    fn test_custom_transitions_reach_reset_effect() {
        let log: Log = Rc::default();
        let fast = EyeTransition {
            close_seconds: 0.25,
            reopen_delay_seconds: 0.0,
            post_close_delay_seconds: 0.0,
        };
        let mut clock = PhaseClock::new(PhaseDurations::uniform(1.0))
            .with_transitions(fast, fast)
            .with_reset_effect(Box::new(RecordingReset { log: log.clone() }));

        clock.report_death();
        assert_eq!(take(&log), vec!["reset Loss 0.25"]);
    }

    #[test]
    fn test_dropped_subscriber_stops_receiving() {
        let (mut clock, recorder, log) = wired_clock();
        drop(recorder);
        clock.start();
        clock.advance_past_start();
        assert!(take(&log).is_empty());
        assert!(clock.events_mut().is_empty());
    }
}
