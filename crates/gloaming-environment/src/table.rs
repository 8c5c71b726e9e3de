//! Phase → lighting target table.

use std::collections::BTreeMap;

use gloaming_cycle::Phase;

use crate::snapshot::{LightingPreset, LightingSnapshot};

/// Lighting target for each phase that has one. Built once, read-only after.
///
/// Start and End normally have no entry; the controller special-cases them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightingTable {
    entries: BTreeMap<Phase, LightingSnapshot>,
}

impl LightingTable {
    pub fn from_presets<'a>(
        presets: impl IntoIterator<Item = (&'a Phase, &'a LightingPreset)>,
    ) -> Self {
        Self {
            entries: presets
                .into_iter()
                .map(|(phase, preset)| (*phase, preset.to_snapshot()))
                .collect(),
        }
    }

    pub fn get(&self, phase: Phase) -> Option<&LightingSnapshot> {
        self.entries.get(&phase)
    }

    /// Phases with a lighting target, in transition order.
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The shipped look of the day, from a warm afternoon to a blue dawn.
pub fn reference_presets() -> BTreeMap<Phase, LightingPreset> {
    BTreeMap::from([
        (
            Phase::Afternoon,
            LightingPreset {
                ambient: [180, 231, 162, 255],
                tint: [173, 149, 86, 255],
                threshold: 0.6,
                light_color: [255, 229, 85, 255],
                light_intensity: 1.5,
            },
        ),
        (
            Phase::Dusk,
            LightingPreset {
                ambient: [128, 88, 84, 255],
                tint: [43, 75, 98, 255],
                threshold: 0.69,
                light_color: [255, 161, 0, 255],
                light_intensity: 1.5,
            },
        ),
        (
            Phase::Night,
            LightingPreset {
                ambient: [9, 18, 20, 255],
                tint: [10, 20, 15, 255],
                threshold: 0.69,
                light_color: [0, 50, 60, 255],
                light_intensity: 1.2,
            },
        ),
        (
            Phase::LateNight,
            LightingPreset {
                ambient: [1, 1, 1, 255],
                tint: [3, 3, 3, 255],
                threshold: 0.69,
                light_color: [2, 0, 2, 255],
                light_intensity: 0.5,
            },
        ),
        (
            Phase::Dawn,
            LightingPreset {
                ambient: [187, 198, 255, 255],
                tint: [96, 146, 166, 255],
                threshold: 0.69,
                light_color: [2, 0, 255, 255],
                light_intensity: 0.5,
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_covers_bounded_phases_only() {
        let table = LightingTable::from_presets(&reference_presets());
        let phases: Vec<_> = table.phases().collect();
        assert_eq!(
            phases,
            vec![
                Phase::Afternoon,
                Phase::Dusk,
                Phase::Night,
                Phase::LateNight,
                Phase::Dawn
            ]
        );
        assert!(table.get(Phase::Start).is_none());
        assert!(table.get(Phase::End).is_none());
    }

    #[test]
    fn test_night_is_darker_than_afternoon() {
        let table = LightingTable::from_presets(&reference_presets());
        let afternoon = table.get(Phase::Afternoon).unwrap();
        let night = table.get(Phase::Night).unwrap();
        assert!(night.ambient.truncate().length() < afternoon.ambient.truncate().length());
        assert!(night.light_intensity < afternoon.light_intensity);
    }
}
