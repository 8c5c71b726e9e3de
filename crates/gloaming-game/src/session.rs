//! One playthrough of the day: clock, environment and reset effect wired
//! together and stepped by the host loop.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use gloaming_config::Config;
use gloaming_cycle::{CycleError, Outcome, Phase, PhaseClock, PhaseDurations, SubscriptionId};
use gloaming_environment::{
    EnvironmentController, EnvironmentError, SceneLighting, WorldDecorations,
};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;

use crate::host::ResetHandle;

/// Environment controller driving the headless scene.
pub type Environment = EnvironmentController<SceneLighting, WorldDecorations>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid day cycle: {0}")]
    Cycle(#[from] CycleError),

    #[error("invalid swarm settings: {0}")]
    InvalidSwarm(#[from] EnvironmentError),
}

pub struct Session {
    clock: PhaseClock,
    environment: Rc<RefCell<Environment>>,
    subscription: SubscriptionId,
    reset: ResetHandle,
    sim_time: f64,
}

impl Session {
    /// Build a day from `config` and fire `Loaded(Start)`.
    ///
    /// `seed` drives debug phase randomization and decoration placement.
    pub fn new(config: &Config, seed: u64) -> Result<Self, SessionError> {
        config.swarm.validate()?;
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

        let mut durations = PhaseDurations::new(&config.cycle.phase_seconds())?;
        if config.cycle.debug_mode {
            durations.randomize(
                &mut rng,
                config.cycle.min_phase_seconds,
                config.cycle.max_phase_seconds,
            )?;
            info!(seconds = ?durations.as_slice(), "debug mode, phase lengths randomized");
        }

        let reset = ResetHandle::new();
        let mut clock = PhaseClock::new(durations)
            .with_transitions(config.game_over.win, config.game_over.loss)
            .with_reset_effect(Box::new(reset.effect()));

        let environment = Rc::new(RefCell::new(EnvironmentController::new(
            config.lighting.table(),
            config.environment_settings(),
            SceneLighting::default(),
            WorldDecorations::new(),
            rng.next_u64(),
        )));
        let subscription = clock.events_mut().subscribe(&environment);

        clock.start();

        Ok(Self {
            clock,
            environment,
            subscription,
            reset,
            sim_time: 0.0,
        })
    }

    /// One fixed step. Returns the outcome once the scene should reload.
    pub fn tick(&mut self, dt: f64) -> Option<Outcome> {
        self.clock.advance(dt);
        let ctx = self.clock.context();
        self.environment.borrow_mut().tick(&ctx);
        self.sim_time += dt;
        self.reset.advance(dt)
    }

    /// The player leaves the opening phase.
    pub fn press_start(&mut self) -> bool {
        self.clock.advance_past_start()
    }

    /// An enemy caught the player.
    pub fn report_death(&mut self) {
        self.clock.report_death();
    }

    pub fn phase(&self) -> Phase {
        self.clock.phase()
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn environment(&self) -> Ref<'_, Environment> {
        self.environment.borrow()
    }

    pub fn environment_mut(&self) -> RefMut<'_, Environment> {
        self.environment.borrow_mut()
    }

    /// Whether the eyes are closing after game over.
    pub fn is_resetting(&self) -> bool {
        self.reset.is_pending()
    }

    /// Simulated seconds since the session began.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.clock.events_mut().unsubscribe(self.subscription);
    }
}
