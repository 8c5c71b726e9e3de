//! Lighting cross-fades and phase-scoped decorations for the day cycle.
//!
//! [`EnvironmentController`] subscribes to the phase clock. On each phase load
//! it either applies a [`LightingSnapshot`] immediately or starts a
//! cancellable [`LightingTransition`] toward the phase's target, and it
//! creates or destroys decorations through a [`DecorationSink`].

mod controller;
mod decorations;
mod error;
mod interpolation;
mod sink;
mod snapshot;
mod table;

pub use controller::{DecorationSchedule, EnvironmentController, EnvironmentSettings};
pub use decorations::{
    Decoration, DecorationKind, DecorationName, DecorationSink, Placement, Position, Swarm,
    MAX_SWARM_SIZE, SwarmMember, SwarmSettings, WorldDecorations,
};
pub use error::EnvironmentError;
pub use interpolation::{LightingTransition, TRANSITION_FRACTION};
pub use sink::{LightingSink, SceneLighting};
pub use snapshot::{LightingPreset, LightingSnapshot, rgba8};
pub use table::{LightingTable, reference_presets};
