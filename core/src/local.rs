//! Single-context debouncer.
//!
//! [`LocalDebouncer`] is the lightweight variant of [`Debouncer`](crate::Debouncer)
//! for code that already runs on one thread, such as a UI event loop driven by
//! a [`LocalSet`](tokio::task::LocalSet). It takes no locks and accepts
//! actions that are not `Send`.
//!
//! The type is `!Send` and `!Sync`, so it cannot be shared with callers on
//! other threads. Code that needs to schedule from several threads must use
//! [`Debouncer`](crate::Debouncer) instead.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, trace};

use crate::debouncer::DEFAULT_DELAY;
use crate::unit::{ArmedUnit, Slot, UnitState};

/// A debouncer confined to the current thread's [`LocalSet`](tokio::task::LocalSet).
///
/// Scheduling semantics match [`Debouncer`](crate::Debouncer): each call
/// cancels the pending action, and only the last one runs after the quiet
/// period.
///
/// # Panics
///
/// The scheduling methods spawn their timers with
/// [`tokio::task::spawn_local`] and panic when called outside a `LocalSet`.
#[derive(Debug)]
pub struct LocalDebouncer {
    default_delay: Duration,
    slot: Rc<RefCell<Slot>>,
}

impl LocalDebouncer {
    /// Creates a debouncer with the given default delay.
    #[must_use]
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            slot: Rc::new(RefCell::new(Slot::new())),
        }
    }

    /// Creates a debouncer with the default delay (1 second).
    #[must_use]
    pub fn with_default_delay() -> Self {
        Self::new(DEFAULT_DELAY)
    }

    #[must_use]
    pub const fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// Schedules `action` to run after the default delay, cancelling any
    /// pending action.
    pub fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.schedule_with_delay(self.default_delay, action);
    }

    /// Schedules `action` to run after `delay`, cancelling any pending action.
    pub fn schedule_with_delay<F, Fut>(&self, delay: Duration, action: F)
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let (armed, replaced) = self.slot.borrow_mut().install();

        trace!(
            generation = armed.generation(),
            delay_ms = delay.as_millis(),
            replaced,
            "Installed local debounce unit"
        );

        tokio::task::spawn_local(run_local_unit(
            Rc::downgrade(&self.slot),
            armed,
            delay,
            action,
        ));
    }

    pub fn schedule_fn<F>(&self, action: F)
    where
        F: FnOnce() + 'static,
    {
        self.schedule(move || async move { action() });
    }

    pub fn schedule_fn_with_delay<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + 'static,
    {
        self.schedule_with_delay(delay, move || async move { action() });
    }

    /// Cancels the pending action. Returns `true` if one was pending.
    pub fn cancel(&self) -> bool {
        self.slot.borrow_mut().cancel().is_some()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_pending()
    }
}

impl Drop for LocalDebouncer {
    fn drop(&mut self) {
        if let Some(generation) = self.slot.borrow_mut().cancel() {
            debug!(generation, "Local debouncer dropped, pending unit cancelled");
        }
    }
}

async fn run_local_unit<F, Fut>(
    slot: Weak<RefCell<Slot>>,
    armed: ArmedUnit,
    delay: Duration,
    action: F,
) where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let generation = armed.generation();

    if !armed.elapsed(delay).await {
        return;
    }

    let state = match slot.upgrade() {
        Some(slot) => slot.borrow_mut().take_if_current(generation),
        None => UnitState::Cancelled,
    };

    trace!(generation, state = ?state, "Local debounce deadline reached");

    if state == UnitState::Fired {
        action().await;
    }
}
