//! Bookkeeping for deferred units of work.
//!
//! A [`Slot`] is the single piece of mutable state a debouncer owns. It holds
//! at most one [`PendingUnit`], stamped with a generation number. Every
//! `install` bumps the generation and cancels the unit it replaces, so a timer
//! that wakes up late can tell it has been superseded by comparing its own
//! generation with the slot's before firing.
//!
//! The slot is not synchronized on its own. [`Debouncer`](crate::Debouncer)
//! wraps it in a mutex, [`LocalDebouncer`](crate::LocalDebouncer) in a
//! `RefCell`.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Lifecycle of a deferred unit. `Fired` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitState {
    Armed,
    Fired,
    Cancelled,
}

/// The unit currently eligible to fire.
#[derive(Debug)]
pub(crate) struct PendingUnit {
    generation: u64,
    cancel: CancellationToken,
}

/// Timer-side view of an installed unit, moved into the spawned timer task.
#[derive(Debug)]
pub(crate) struct ArmedUnit {
    generation: u64,
    cancel: CancellationToken,
}

impl ArmedUnit {
    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits out `delay`. Returns `false` if the unit was cancelled first.
    ///
    /// Cancellation releases the timer immediately; the sleep future is
    /// dropped without completing.
    pub(crate) async fn elapsed(&self, delay: Duration) -> bool {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => false,
            () = tokio::time::sleep(delay) => true,
        }
    }
}

/// Single-slot state shared by a debouncer and its timer tasks.
#[derive(Debug, Default)]
pub(crate) struct Slot {
    next_generation: u64,
    pending: Option<PendingUnit>,
}

impl Slot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cancels whatever is pending and installs a fresh unit.
    ///
    /// Returns the armed half for the timer task and whether a previous unit
    /// was replaced.
    pub(crate) fn install(&mut self) -> (ArmedUnit, bool) {
        let replaced = self.cancel().is_some();

        self.next_generation = self.next_generation.wrapping_add(1);
        let cancel = CancellationToken::new();
        self.pending = Some(PendingUnit {
            generation: self.next_generation,
            cancel: cancel.clone(),
        });

        (
            ArmedUnit {
                generation: self.next_generation,
                cancel,
            },
            replaced,
        )
    }

    /// Claims the slot for firing.
    ///
    /// Succeeds only if `generation` is still the pending unit, in which case
    /// the slot is cleared. A superseded or cancelled unit gets `Cancelled`.
    pub(crate) fn take_if_current(&mut self, generation: u64) -> UnitState {
        match &self.pending {
            Some(unit) if unit.generation == generation && !unit.cancel.is_cancelled() => {
                self.pending = None;
                UnitState::Fired
            }
            _ => UnitState::Cancelled,
        }
    }

    /// Cancels the pending unit, returning its generation.
    pub(crate) fn cancel(&mut self) -> Option<u64> {
        self.pending.take().map(|unit| {
            unit.cancel.cancel();
            unit.generation
        })
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// State of the unit with `generation`, as seen from the slot.
    #[cfg(test)]
    pub(crate) fn state_of(&self, generation: u64) -> UnitState {
        match &self.pending {
            Some(unit) if unit.generation == generation => UnitState::Armed,
            _ => UnitState::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_on_empty_slot_replaces_nothing() {
        let mut slot = Slot::new();
        let (armed, replaced) = slot.install();

        assert!(!replaced);
        assert_eq!(armed.generation(), 1);
        assert!(slot.is_pending());
        assert_eq!(slot.state_of(1), UnitState::Armed);
    }

    #[test]
    fn install_cancels_previous_unit() {
        let mut slot = Slot::new();
        let (first, _) = slot.install();
        let (second, replaced) = slot.install();

        assert!(replaced);
        assert!(first.cancel.is_cancelled());
        assert!(!second.cancel.is_cancelled());
        assert_eq!(slot.state_of(first.generation()), UnitState::Cancelled);
        assert_eq!(slot.state_of(second.generation()), UnitState::Armed);
    }

    #[test]
    fn superseded_unit_cannot_fire() {
        let mut slot = Slot::new();
        let (first, _) = slot.install();
        let (second, _) = slot.install();

        assert_eq!(slot.take_if_current(first.generation()), UnitState::Cancelled);
        assert!(slot.is_pending(), "current unit must survive a stale claim");
        assert_eq!(slot.take_if_current(second.generation()), UnitState::Fired);
        assert!(!slot.is_pending());
    }

    #[test]
    fn unit_fires_at_most_once() {
        let mut slot = Slot::new();
        let (armed, _) = slot.install();

        assert_eq!(slot.take_if_current(armed.generation()), UnitState::Fired);
        assert_eq!(slot.take_if_current(armed.generation()), UnitState::Cancelled);
    }

    #[test]
    fn cancel_empties_slot() {
        let mut slot = Slot::new();
        assert_eq!(slot.cancel(), None);

        let (armed, _) = slot.install();
        assert_eq!(slot.cancel(), Some(armed.generation()));
        assert!(armed.cancel.is_cancelled());
        assert!(!slot.is_pending());
        assert_eq!(slot.take_if_current(armed.generation()), UnitState::Cancelled);
    }

    #[test]
    fn generations_increase_across_installs() {
        let mut slot = Slot::new();
        let generations: Vec<u64> = (0..5).map(|_| slot.install().0.generation()).collect();
        assert_eq!(generations, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn elapsed_returns_true_after_delay() {
        let mut slot = Slot::new();
        let (armed, _) = slot.install();
        assert!(armed.elapsed(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn elapsed_returns_false_when_cancelled() {
        let mut slot = Slot::new();
        let (armed, _) = slot.install();
        slot.cancel();

        let started = tokio::time::Instant::now();
        assert!(!armed.elapsed(Duration::from_secs(10)).await);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
