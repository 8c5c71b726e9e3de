//! Lighting snapshots: the five channels the day cycle cross-fades.
//!
//! [`LightingSnapshot`] is the runtime form, with linear RGBA colors in
//! `[0, 1]`. [`LightingPreset`] is the authored form, with 8-bit colors as
//! they appear in config files.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// One complete lighting state.
///
/// Channels are independent: [`lerp`](Self::lerp) blends each with the same
/// fraction and no cross-channel coupling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingSnapshot {
    /// Ambient sky color.
    pub ambient: Vec4,
    /// Skybox tint color.
    pub tint: Vec4,
    /// Bloom threshold.
    pub threshold: f32,
    /// Directional light color.
    pub light_color: Vec4,
    /// Directional light intensity.
    pub light_intensity: f32,
}

impl LightingSnapshot {
    /// Blend toward `target`. `t = 0` yields `self`, `t = 1` yields `target`.
    pub fn lerp(&self, target: &Self, t: f32) -> Self {
        Self {
            ambient: self.ambient.lerp(target.ambient, t),
            tint: self.tint.lerp(target.tint, t),
            threshold: lerp_scalar(self.threshold, target.threshold, t),
            light_color: self.light_color.lerp(target.light_color, t),
            light_intensity: lerp_scalar(self.light_intensity, target.light_intensity, t),
        }
    }

    /// Largest per-component difference to `other`, over every channel.
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        [
            (self.ambient - other.ambient).abs().max_element(),
            (self.tint - other.tint).abs().max_element(),
            (self.threshold - other.threshold).abs(),
            (self.light_color - other.light_color).abs().max_element(),
            (self.light_intensity - other.light_intensity).abs(),
        ]
        .into_iter()
        .fold(0.0, f32::max)
    }
}

impl Default for LightingSnapshot {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            tint: Vec4::new(0.5, 0.5, 0.5, 1.0),
            threshold: 0.5,
            light_color: Vec4::ONE,
            light_intensity: 1.0,
        }
    }
}

fn lerp_scalar(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert an 8-bit RGBA color to linear floats in `[0, 1]`.
pub fn rgba8(color: [u8; 4]) -> Vec4 {
    Vec4::from_array(color.map(|c| c as f32 / 255.0))
}

/// Authored lighting values for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingPreset {
    pub ambient: [u8; 4],
    pub tint: [u8; 4],
    pub threshold: f32,
    pub light_color: [u8; 4],
    pub light_intensity: f32,
}

impl LightingPreset {
    pub fn to_snapshot(&self) -> LightingSnapshot {
        LightingSnapshot {
            ambient: rgba8(self.ambient),
            tint: rgba8(self.tint),
            threshold: self.threshold,
            light_color: rgba8(self.light_color),
            light_intensity: self.light_intensity,
        }
    }
}

impl From<&LightingPreset> for LightingSnapshot {
    fn from(preset: &LightingPreset) -> Self {
        preset.to_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bright() -> LightingSnapshot {
        LightingSnapshot {
            ambient: Vec4::new(1.0, 0.8, 0.6, 1.0),
            tint: Vec4::new(0.4, 0.4, 0.2, 1.0),
            threshold: 0.6,
            light_color: Vec4::new(1.0, 0.9, 0.3, 1.0),
            light_intensity: 1.5,
        }
    }

    fn dark() -> LightingSnapshot {
        LightingSnapshot {
            ambient: Vec4::new(0.0, 0.1, 0.1, 1.0),
            tint: Vec4::new(0.0, 0.0, 0.1, 1.0),
            threshold: 0.7,
            light_color: Vec4::new(0.0, 0.2, 0.25, 1.0),
            light_intensity: 0.5,
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        assert!(bright().lerp(&dark(), 0.0).max_abs_diff(&bright()) < 1e-6);
        assert!(bright().lerp(&dark(), 1.0).max_abs_diff(&dark()) < 1e-6);
    }

    #[test]
    fn test_lerp_midpoint_is_per_channel() {
        let mid = bright().lerp(&dark(), 0.5);
        assert!((mid.threshold - 0.65).abs() < 1e-6);
        assert!((mid.light_intensity - 1.0).abs() < 1e-6);
        assert!((mid.ambient.x - 0.5).abs() < 1e-6);
        assert!((mid.tint.z - 0.15).abs() < 1e-6);
        assert!((mid.light_color.y - 0.55).abs() < 1e-6);
        assert!((mid.ambient.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rgba8_scales_to_unit_range() {
        let c = rgba8([255, 0, 51, 255]);
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!(c.y.abs() < 1e-6);
        assert!((c.z - 0.2).abs() < 1e-6);
        assert!((c.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_preset_converts_every_channel() {
        let preset = LightingPreset {
            ambient: [255, 255, 255, 255],
            tint: [0, 0, 0, 255],
            threshold: 0.69,
            light_color: [255, 161, 0, 255],
            light_intensity: 1.2,
        };
        let snapshot = LightingSnapshot::from(&preset);
        assert_eq!(snapshot.ambient, Vec4::ONE);
        assert_eq!(snapshot.tint, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(snapshot.threshold, 0.69);
        assert_eq!(snapshot.light_intensity, 1.2);
        assert!((snapshot.light_color.y - 161.0 / 255.0).abs() < 1e-6);
    }
}
