//! The ordered time-of-day phases.

use serde::{Deserialize, Serialize};

/// A named stage of the day cycle.
///
/// Declaration order is transition order: the clock starts in [`Phase::Start`]
/// and only ever moves one step forward until it reaches [`Phase::End`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Start,
    Afternoon,
    Dusk,
    Night,
    LateNight,
    Dawn,
    End,
}

impl Phase {
    /// Every phase, in transition order.
    pub const ALL: [Phase; 7] = [
        Phase::Start,
        Phase::Afternoon,
        Phase::Dusk,
        Phase::Night,
        Phase::LateNight,
        Phase::Dawn,
        Phase::End,
    ];

    /// Number of phases in the enumeration.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this phase in [`Phase::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one, or `None` for [`Phase::End`].
    pub fn next(self) -> Option<Phase> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Start and End never end on their own.
    pub fn is_unbounded(self) -> bool {
        matches!(self, Phase::Start | Phase::End)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
