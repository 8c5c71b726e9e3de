//! Day-cycle phase clock and event dispatch.
//!
//! The [`PhaseClock`] walks the fixed [`Phase`] sequence on a single logical
//! clock. Subscribers implementing [`PhaseListener`] register with the clock's
//! [`PhaseEvents`] and are notified synchronously on every transition. The
//! clock also owns the game-over path shared by the win and loss outcomes.

mod clock;
mod durations;
mod error;
mod events;
mod game_over;
mod phase;

pub use clock::PhaseClock;
pub use durations::PhaseDurations;
pub use error::CycleError;
pub use events::{PhaseContext, PhaseEvent, PhaseEvents, PhaseListener, SubscriptionId};
pub use game_over::{EyeTransition, Outcome, ResetEffect};
pub use phase::Phase;
