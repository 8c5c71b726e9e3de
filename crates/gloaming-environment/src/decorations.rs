//! Phase-scoped decorative entities.
//!
//! The controller talks to a [`DecorationSink`]; [`WorldDecorations`] is the
//! ECS-backed sink used by headless hosts. A swarm (butterflies) is a root
//! entity owning its member entities, and destroying the root destroys them
//! all.

use bevy_ecs::prelude::*;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EnvironmentError;

/// Largest swarm the settings may ask for.
pub const MAX_SWARM_SIZE: usize = 256;

/// Kinds of background decoration the day cycle spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DecorationKind {
    Butterflies,
    Dust,
    Fireflies,
}

impl DecorationKind {
    /// Unique name of the live instance.
    pub fn name(self) -> &'static str {
        match self {
            DecorationKind::Butterflies => "butterflies",
            DecorationKind::Dust => "dust",
            DecorationKind::Fireflies => "fireflies",
        }
    }
}

/// Where a decoration's parts go when it is created.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// A single emitter at the scene origin.
    Anchored,
    /// One member per point, owned by a common root.
    Swarm(Vec<Vec3>),
}

/// Host-side entity lifecycle for decorations.
pub trait DecorationSink {
    type Handle: Copy + std::fmt::Debug;

    fn create(&mut self, kind: DecorationKind, placement: &Placement) -> Self::Handle;

    /// Remove the decoration and everything it owns.
    fn destroy(&mut self, handle: Self::Handle);

    fn find_by_name(&mut self, name: &str) -> Option<Self::Handle>;
}

/// How a butterfly swarm is scattered around the scene origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmSettings {
    /// Smallest member count (inclusive).
    pub count_min: usize,
    /// Largest member count (exclusive).
    pub count_max: usize,
    /// Members land in `[-half_extent, half_extent]` on x and z.
    pub half_extent: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Default for SwarmSettings {
    fn default() -> Self {
        Self {
            count_min: 4,
            count_max: 6,
            half_extent: 4.0,
            min_height: 0.5,
            max_height: 2.0,
        }
    }
}

impl SwarmSettings {
    /// Reject extents that cannot be sampled and oversized swarms.
    ///
    /// A negative extent or swapped heights are fine; they are normalized
    /// when scattering.
    pub fn validate(&self) -> Result<(), EnvironmentError> {
        for (field, value) in [
            ("half_extent", self.half_extent),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
        ] {
            if !value.is_finite() {
                return Err(EnvironmentError::NonFiniteSwarmBound { field, value });
            }
        }

        let largest = self.count_min.max(self.count_max.saturating_sub(1));
        if largest > MAX_SWARM_SIZE {
            return Err(EnvironmentError::SwarmTooLarge {
                count: largest,
                max: MAX_SWARM_SIZE,
            });
        }
        Ok(())
    }

    /// Placement for a new decoration of `kind`.
    pub fn placement<R: Rng + ?Sized>(&self, kind: DecorationKind, rng: &mut R) -> Placement {
        match kind {
            DecorationKind::Butterflies => Placement::Swarm(self.scatter(rng)),
            DecorationKind::Dust | DecorationKind::Fireflies => Placement::Anchored,
        }
    }

    fn scatter<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec3> {
        if let Err(e) = self.validate() {
            warn!("{e}, spawning an empty swarm");
            return Vec::new();
        }

        let count = if self.count_max > self.count_min {
            rng.gen_range(self.count_min..self.count_max)
        } else {
            self.count_min
        };
        let extent = self.half_extent.abs();
        let (low, high) = (
            self.min_height.min(self.max_height),
            self.min_height.max(self.max_height),
        );

        (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(low..=high),
                    rng.gen_range(-extent..=extent),
                )
            })
            .collect()
    }
}

/// Unique lookup name of a decoration root.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DecorationName(pub String);

/// Marks a decoration root and records its kind.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration(pub DecorationKind);

/// Scene-space position of a decoration part.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

/// Members owned by a swarm root.
#[derive(Component, Debug, Clone, Default)]
pub struct Swarm(pub Vec<Entity>);

/// Back-reference from a swarm member to its root.
#[derive(Component, Debug, Clone, Copy)]
pub struct SwarmMember(pub Entity);

/// Decorations stored as entities in a private [`World`].
#[derive(Default)]
pub struct WorldDecorations {
    world: World,
}

impl WorldDecorations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Names of the live decoration roots, sorted.
    pub fn live_names(&mut self) -> Vec<String> {
        let mut query = self.world.query::<&DecorationName>();
        let mut names: Vec<String> = query.iter(&self.world).map(|n| n.0.clone()).collect();
        names.sort();
        names
    }

    /// Total live entities, roots and swarm members included.
    pub fn entity_count(&self) -> u32 {
        self.world.entities().len()
    }
}

impl DecorationSink for WorldDecorations {
    type Handle = Entity;

    fn create(&mut self, kind: DecorationKind, placement: &Placement) -> Entity {
        let root = self
            .world
            .spawn((
                DecorationName(kind.name().to_string()),
                Decoration(kind),
                Position(Vec3::ZERO),
            ))
            .id();

        if let Placement::Swarm(points) = placement {
            let members: Vec<Entity> = points
                .iter()
                .map(|point| self.world.spawn((SwarmMember(root), Position(*point))).id())
                .collect();
            self.world.entity_mut(root).insert(Swarm(members));
        }
        root
    }

    fn destroy(&mut self, handle: Entity) {
        let members = self
            .world
            .get::<Swarm>(handle)
            .map(|swarm| swarm.0.clone())
            .unwrap_or_default();
        for member in members {
            self.world.despawn(member);
        }
        self.world.despawn(handle);
    }

    fn find_by_name(&mut self, name: &str) -> Option<Entity> {
        let mut query = self.world.query::<(Entity, &DecorationName)>();
        query
            .iter(&self.world)
            .find(|(_, decoration)| decoration.0 == name)
            .map(|(entity, _)| entity)
    }
}
