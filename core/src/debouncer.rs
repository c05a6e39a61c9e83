//! Thread-safe single-slot debouncer.
//!
//! [`Debouncer`] coalesces rapid "run this later" requests into at most one
//! execution. Each call to [`Debouncer::schedule`] cancels whatever is still
//! pending and arms a fresh timer; only the action from the last call runs,
//! once the quiet period has passed with no further calls.
//!
//! # Architecture
//!
//! The debouncer owns a mutex-guarded slot holding at most one pending unit.
//! When a request arrives:
//!
//! 1. The pending unit, if any, is cancelled and its generation retired
//! 2. A new unit is stamped with the next generation and installed
//! 3. A timer task is spawned that sleeps for the delay, then takes the same
//!    lock and fires only if its generation is still the installed one
//!
//! The generation check under the lock closes the race between a late timer
//! and a concurrent `schedule`. The action itself runs after the lock is
//! released, so a slow action never blocks new requests.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use lull_core::Debouncer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let debouncer = Debouncer::new(Duration::from_millis(100));
//!
//!     for query in ["h", "he", "hel", "hell", "hello"] {
//!         debouncer.schedule_fn(move || println!("searching for {query}"));
//!     }
//!
//!     // Only "searching for hello" is printed.
//!     tokio::time::sleep(Duration::from_millis(150)).await;
//! }
//! ```

use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::error::{DebouncerError, Result};
use crate::unit::{ArmedUnit, Slot, UnitState};

/// Default quiet period in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Default quiet period.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(DEFAULT_DELAY_MS);

/// A debouncer that runs only the most recently scheduled action.
///
/// # Thread Safety
///
/// `Debouncer` is `Send + Sync`. Share it behind an [`Arc`] to schedule from
/// several threads or tasks; every call is serialized on an internal lock.
/// The lock protects only the debouncer's own state. Whatever the action
/// touches is the caller's responsibility.
///
/// # Teardown
///
/// Dropping the debouncer cancels the pending action, if any. Its timer is
/// released without firing.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet period used when a call does not override it.
    default_delay: Duration,
    /// The pending slot. Timer tasks hold only a weak reference.
    slot: Arc<Mutex<Slot>>,
    /// Runtime that drives the timer tasks.
    handle: Handle,
}

impl Debouncer {
    /// Creates a debouncer on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime. Use [`Debouncer::try_new`]
    /// or [`Debouncer::with_handle`] when that cannot be guaranteed.
    #[must_use]
    pub fn new(default_delay: Duration) -> Self {
        Self::with_handle(default_delay, Handle::current())
    }

    /// Creates a debouncer on the current Tokio runtime, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`DebouncerError::NoRuntime`] when called outside a runtime.
    pub fn try_new(default_delay: Duration) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| DebouncerError::NoRuntime)?;
        Ok(Self::with_handle(default_delay, handle))
    }

    /// Creates a debouncer whose timers run on `handle`.
    ///
    /// The resulting debouncer can be used from threads that are not part of
    /// any runtime.
    #[must_use]
    pub fn with_handle(default_delay: Duration, handle: Handle) -> Self {
        debug!(
            default_delay_ms = default_delay.as_millis(),
            "Creating debouncer"
        );
        Self {
            default_delay,
            slot: Arc::new(Mutex::new(Slot::new())),
            handle,
        }
    }

    /// Creates a debouncer with the default delay (1 second).
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn with_default_delay() -> Self {
        Self::new(DEFAULT_DELAY)
    }

    /// Returns the quiet period used when a call does not override it.
    #[must_use]
    pub const fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// Schedules `action` to run after the default delay.
    ///
    /// Any action still pending from an earlier call is cancelled and will
    /// never run. Returns once the new action is installed, not once it runs.
    pub fn schedule<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.schedule_with_delay(self.default_delay, action);
    }

    /// Schedules `action` to run after `delay` instead of the default.
    ///
    /// The override applies to this call only.
    pub fn schedule_with_delay<F, Fut>(&self, delay: Duration, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (armed, replaced) = self.slot.lock().install();

        trace!(
            generation = armed.generation(),
            delay_ms = delay.as_millis(),
            replaced,
            state = ?UnitState::Armed,
            "Installed debounce unit"
        );

        let slot = Arc::downgrade(&self.slot);
        self.handle.spawn(run_unit(slot, armed, delay, action));
    }

    /// Schedules a synchronous closure to run after the default delay.
    pub fn schedule_fn<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule(move || async move { action() });
    }

    /// Schedules a synchronous closure to run after `delay`.
    pub fn schedule_fn_with_delay<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_with_delay(delay, move || async move { action() });
    }

    /// Cancels the pending action without scheduling a new one.
    ///
    /// Returns `true` if an action was pending. An action that has already
    /// started is left to finish.
    pub fn cancel(&self) -> bool {
        match self.slot.lock().cancel() {
            Some(generation) => {
                trace!(generation, state = ?UnitState::Cancelled, "Cancelled debounce unit");
                true
            }
            None => false,
        }
    }

    /// Returns `true` while an action is armed and waiting for its delay.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_pending()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(generation) = self.slot.lock().cancel() {
            debug!(generation, "Debouncer dropped, pending unit cancelled");
        }
    }
}

/// Timer task for one deferred unit.
async fn run_unit<F, Fut>(slot: Weak<Mutex<Slot>>, armed: ArmedUnit, delay: Duration, action: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let generation = armed.generation();

    if !armed.elapsed(delay).await {
        trace!(generation, "Debounce unit cancelled before its deadline");
        return;
    }

    // The debouncer may be gone, or a newer unit may have been installed
    // while this one was waking up.
    let state = match slot.upgrade() {
        Some(slot) => slot.lock().take_if_current(generation),
        None => UnitState::Cancelled,
    };

    trace!(generation, state = ?state, "Debounce deadline reached");

    if state == UnitState::Fired {
        action().await;
    }
}
