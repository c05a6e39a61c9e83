//! Search-as-you-type model driven by a debouncer.
//!
//! [`SearchBox`] tracks the raw field text, which changes on every keystroke,
//! and the search query, which is only updated once typing pauses for the
//! debouncer's quiet period.

use std::sync::Arc;
use std::time::Duration;

use lull_core::Debouncer;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A search field whose query follows its text after a quiet period.
#[derive(Debug)]
pub struct SearchBox {
    /// Current field contents.
    text: String,
    /// Last query applied by the debouncer.
    query: Arc<Mutex<String>>,
    debouncer: Debouncer,
    /// Receives each query as it is applied.
    updates: Option<mpsc::UnboundedSender<String>>,
}

impl SearchBox {
    /// Creates an empty search box.
    #[must_use]
    pub fn new(debouncer: Debouncer) -> Self {
        Self {
            text: String::new(),
            query: Arc::new(Mutex::new(String::new())),
            debouncer,
            updates: None,
        }
    }

    /// Creates an empty search box that reports every applied query on
    /// `updates`.
    #[must_use]
    pub fn with_updates(debouncer: Debouncer, updates: mpsc::UnboundedSender<String>) -> Self {
        Self {
            updates: Some(updates),
            ..Self::new(debouncer)
        }
    }

    /// Records new field contents and schedules the query update.
    pub fn on_change(&mut self, text: impl Into<String>) {
        self.text = text.into();
        debug!(text = %self.text, "Search text changed");

        let value = self.text.clone();
        let query = Arc::clone(&self.query);
        let updates = self.updates.clone();
        self.debouncer.schedule_fn(move || {
            info!(query = %value, "Applying search query");
            *query.lock() = value.clone();
            if let Some(updates) = updates {
                // Receiver gone means nobody is listening any more.
                let _ = updates.send(value);
            }
        });
    }

    /// Current field contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The query most recently applied.
    #[must_use]
    pub fn query(&self) -> String {
        self.query.lock().clone()
    }

    /// Returns `true` while a query update is waiting for the quiet period.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The quiet period after which the query follows the text.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.debouncer.default_delay()
    }
}

/// Types `text` into `search` one character at a time.
///
/// Each keystroke produces a change event with the text typed so far,
/// followed by a pause of `keystroke_interval`.
pub async fn simulate_typing(search: &mut SearchBox, text: &str, keystroke_interval: Duration) {
    let mut typed = String::with_capacity(text.len());
    for ch in text.chars() {
        typed.push(ch);
        search.on_change(typed.as_str());
        tokio::time::sleep(keystroke_interval).await;
    }
}
