//! Synchronous phase event dispatch.
//!
//! Subscribers register an `Rc<RefCell<_>>` with [`PhaseEvents::subscribe`]
//! when they are wired up and call [`PhaseEvents::unsubscribe`] on teardown.
//! The dispatcher only keeps weak handles, so a subscriber that is dropped
//! without unsubscribing is pruned on the next dispatch.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::warn;

use crate::phase::Phase;

/// Clock state delivered alongside every phase event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseContext {
    /// The clock's current phase.
    pub phase: Phase,
    /// Seconds spent in `phase` so far.
    pub elapsed: f64,
    /// Configured length of `phase` in seconds (infinite for Start/End).
    pub duration: f64,
}

/// Receiver of clock events. Every callback defaults to doing nothing.
pub trait PhaseListener {
    /// `phase` just became current.
    fn on_phase_loaded(&mut self, _phase: Phase, _ctx: &PhaseContext) {}

    /// `phase` is being left. Fired before the following load.
    fn on_phase_unloaded(&mut self, _phase: Phase, _ctx: &PhaseContext) {}

    /// The game ended in a loss.
    fn on_death_by_enemy(&mut self) {}
}

/// Handle returned by [`PhaseEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// One event as delivered by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEvent {
    Loaded(Phase),
    Unloaded(Phase),
    DeathByEnemy,
}

/// Ordered list of subscribers. Events reach them in subscription order.
#[derive(Default)]
pub struct PhaseEvents {
    listeners: Vec<(SubscriptionId, Weak<RefCell<dyn PhaseListener>>)>,
    next_id: u64,
}

impl PhaseEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every subsequent event.
    pub fn subscribe<L: PhaseListener + 'static>(
        &mut self,
        listener: &Rc<RefCell<L>>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let erased: Rc<RefCell<dyn PhaseListener>> = listener.clone();
        self.listeners.push((id, Rc::downgrade(&erased)));
        id
    }

    /// Stop delivering events to the subscription. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Number of live subscribers.
    pub fn len(&self) -> usize {
        self.listeners
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to every live subscriber before returning.
    pub fn dispatch(&mut self, event: PhaseEvent, ctx: &PhaseContext) {
        self.listeners.retain(|(_, weak)| weak.strong_count() > 0);

        for (id, weak) in &self.listeners {
            let Some(listener) = weak.upgrade() else {
                continue;
            };
            let Ok(mut listener) = listener.try_borrow_mut() else {
                warn!(?id, ?event, "subscriber busy, event skipped");
                continue;
            };

            match event {
                PhaseEvent::Loaded(phase) => listener.on_phase_loaded(phase, ctx),
                PhaseEvent::Unloaded(phase) => listener.on_phase_unloaded(phase, ctx),
                PhaseEvent::DeathByEnemy => listener.on_death_by_enemy(),
            }
        }
    }
}

impl std::fmt::Debug for PhaseEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseEvents")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
