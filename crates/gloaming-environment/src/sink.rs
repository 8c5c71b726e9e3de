//! The host's live lighting state.

use glam::Vec4;

use crate::snapshot::LightingSnapshot;

/// Readable and writable lighting channels owned by the host.
///
/// The controller captures the current values through this trait when a
/// transition starts, so a fade always begins from whatever is on screen.
pub trait LightingSink {
    fn ambient_color(&self) -> Vec4;
    fn set_ambient_color(&mut self, color: Vec4);

    fn tint_color(&self) -> Vec4;
    fn set_tint_color(&mut self, color: Vec4);

    fn threshold(&self) -> f32;
    fn set_threshold(&mut self, threshold: f32);

    fn light_color(&self) -> Vec4;
    fn set_light_color(&mut self, color: Vec4);

    fn light_intensity(&self) -> f32;
    fn set_light_intensity(&mut self, intensity: f32);

    /// Read every channel.
    fn capture(&self) -> LightingSnapshot {
        LightingSnapshot {
            ambient: self.ambient_color(),
            tint: self.tint_color(),
            threshold: self.threshold(),
            light_color: self.light_color(),
            light_intensity: self.light_intensity(),
        }
    }

    /// Write every channel.
    fn apply(&mut self, snapshot: &LightingSnapshot) {
        self.set_ambient_color(snapshot.ambient);
        self.set_tint_color(snapshot.tint);
        self.set_threshold(snapshot.threshold);
        self.set_light_color(snapshot.light_color);
        self.set_light_intensity(snapshot.light_intensity);
    }
}

/// In-memory lighting state for headless hosts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneLighting {
    current: LightingSnapshot,
    writes: u64,
}

impl SceneLighting {
    pub fn new(initial: LightingSnapshot) -> Self {
        Self {
            current: initial,
            writes: 0,
        }
    }

    /// Number of full snapshots written through [`LightingSink::apply`].
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl LightingSink for SceneLighting {
    fn ambient_color(&self) -> Vec4 {
        self.current.ambient
    }

    fn set_ambient_color(&mut self, color: Vec4) {
        self.current.ambient = color;
    }

    fn tint_color(&self) -> Vec4 {
        self.current.tint
    }

    fn set_tint_color(&mut self, color: Vec4) {
        self.current.tint = color;
    }

    fn threshold(&self) -> f32 {
        self.current.threshold
    }

    fn set_threshold(&mut self, threshold: f32) {
        self.current.threshold = threshold;
    }

    fn light_color(&self) -> Vec4 {
        self.current.light_color
    }

    fn set_light_color(&mut self, color: Vec4) {
        self.current.light_color = color;
    }

    fn light_intensity(&self) -> f32 {
        self.current.light_intensity
    }

    fn set_light_intensity(&mut self, intensity: f32) {
        self.current.light_intensity = intensity;
    }

    fn apply(&mut self, snapshot: &LightingSnapshot) {
        self.current = *snapshot;
        self.writes += 1;
    }
}
