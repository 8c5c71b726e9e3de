//! Reacts to phase events by driving lighting and decorations.

use std::collections::BTreeMap;

use gloaming_cycle::{Phase, PhaseContext, PhaseListener};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::decorations::{DecorationKind, DecorationSink, SwarmSettings};
use crate::interpolation::{LightingTransition, TRANSITION_FRACTION};
use crate::sink::LightingSink;
use crate::snapshot::LightingSnapshot;
use crate::table::LightingTable;

/// Which decorations appear on phase load and go away on phase unload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationSchedule {
    pub on_load: BTreeMap<Phase, Vec<DecorationKind>>,
    pub on_unload: BTreeMap<Phase, Vec<DecorationKind>>,
}

impl Default for DecorationSchedule {
    fn default() -> Self {
        Self {
            on_load: BTreeMap::from([
                (
                    Phase::Start,
                    vec![DecorationKind::Dust, DecorationKind::Butterflies],
                ),
                (Phase::Dusk, vec![DecorationKind::Fireflies]),
            ]),
            on_unload: BTreeMap::from([
                (Phase::Dusk, vec![DecorationKind::Butterflies]),
                (Phase::Night, vec![DecorationKind::Fireflies]),
                (Phase::LateNight, vec![DecorationKind::Dust]),
            ]),
        }
    }
}

impl DecorationSchedule {
    fn loaded(&self, phase: Phase) -> &[DecorationKind] {
        self.on_load.get(&phase).map(Vec::as_slice).unwrap_or_default()
    }

    fn unloaded(&self, phase: Phase) -> &[DecorationKind] {
        self.on_unload.get(&phase).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Tunables for an [`EnvironmentController`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSettings {
    /// Share of the entered phase's length spent fading in its lighting.
    pub transition_fraction: f64,
    pub schedule: DecorationSchedule,
    pub swarm: SwarmSettings,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            transition_fraction: TRANSITION_FRACTION,
            schedule: DecorationSchedule::default(),
            swarm: SwarmSettings::default(),
        }
    }
}

struct ActiveTransition {
    task: LightingTransition,
    /// Phase time of the last applied step.
    stepped_at: f64,
}

/// Subscriber that owns lighting fades and decoration lifecycles.
///
/// Register it with the clock's event dispatcher, then call
/// [`tick`](Self::tick) once per host tick after the clock has advanced.
pub struct EnvironmentController<L, D> {
    table: LightingTable,
    settings: EnvironmentSettings,
    lighting: L,
    decorations: D,
    transition: Option<ActiveTransition>,
    rng: Xoshiro256StarStar,
}

impl<L: LightingSink, D: DecorationSink> EnvironmentController<L, D> {
    pub fn new(
        table: LightingTable,
        settings: EnvironmentSettings,
        lighting: L,
        decorations: D,
        seed: u64,
    ) -> Self {
        Self {
            table,
            settings,
            lighting,
            decorations,
            transition: None,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Resume the active fade for this tick.
    ///
    /// A step is only taken when phase time moved since the last one, so a
    /// fade launched during this tick's event dispatch is not stepped twice.
    pub fn tick(&mut self, ctx: &PhaseContext) {
        let Some(active) = self.transition.as_mut() else {
            return;
        };
        if ctx.elapsed == active.stepped_at {
            return;
        }

        match active.task.step(ctx.elapsed) {
            Some(blended) => {
                self.lighting.apply(&blended);
                active.stepped_at = ctx.elapsed;
            }
            None => {
                debug!(phase = %ctx.phase, "lighting transition finished");
                self.transition = None;
            }
        }
    }

    /// Whether a fade is still running.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// The running fade, if any.
    pub fn transition(&self) -> Option<&LightingTransition> {
        self.transition.as_ref().map(|active| &active.task)
    }

    pub fn lighting(&self) -> &L {
        &self.lighting
    }

    pub fn decorations(&self) -> &D {
        &self.decorations
    }

    pub fn decorations_mut(&mut self) -> &mut D {
        &mut self.decorations
    }

    /// Drop the running fade. It never runs another step.
    pub fn cancel_transition(&mut self) {
        if self.transition.take().is_some() {
            debug!("lighting transition cancelled");
        }
    }

    fn launch_transition(&mut self, target: LightingSnapshot, ctx: &PhaseContext) {
        self.cancel_transition();

        let start = self.lighting.capture();
        let mut task =
            LightingTransition::new(start, target, ctx.duration, self.settings.transition_fraction);
        debug!(phase = %ctx.phase, window = task.window(), "lighting transition launched");

        match task.step(ctx.elapsed) {
            Some(first) => {
                self.lighting.apply(&first);
                self.transition = Some(ActiveTransition {
                    task,
                    stepped_at: ctx.elapsed,
                });
            }
            None => warn!(
                phase = %ctx.phase,
                window = task.window(),
                "lighting transition window is empty, target not applied"
            ),
        }
    }

    fn spawn(&mut self, kind: DecorationKind) {
        if let Some(existing) = self.decorations.find_by_name(kind.name()) {
            warn!(name = kind.name(), ?existing, "decoration already live, not spawning");
            return;
        }
        let placement = self.settings.swarm.placement(kind, &mut self.rng);
        let handle = self.decorations.create(kind, &placement);
        info!(name = kind.name(), ?handle, "decoration created");
    }

    fn despawn(&mut self, kind: DecorationKind) {
        if let Some(handle) = self.decorations.find_by_name(kind.name()) {
            self.decorations.destroy(handle);
            info!(name = kind.name(), ?handle, "decoration removed");
        }
    }
}

impl<L: LightingSink, D: DecorationSink> PhaseListener for EnvironmentController<L, D> {
    fn on_phase_loaded(&mut self, phase: Phase, ctx: &PhaseContext) {
        match phase {
            Phase::Start => {
                self.cancel_transition();
                let initial = phase.next().and_then(|next| self.table.get(next)).copied();
                match initial {
                    Some(snapshot) => self.lighting.apply(&snapshot),
                    None => warn!("no lighting for the phase after Start"),
                }
            }
            Phase::End => self.cancel_transition(),
            _ => {
                if let Some(target) = self.table.get(phase).copied() {
                    self.launch_transition(target, ctx);
                }
            }
        }

        for kind in self.settings.schedule.loaded(phase).to_vec() {
            self.spawn(kind);
        }
    }

    fn on_phase_unloaded(&mut self, phase: Phase, _ctx: &PhaseContext) {
        for kind in self.settings.schedule.unloaded(phase).to_vec() {
            self.despawn(kind);
        }
    }
}
