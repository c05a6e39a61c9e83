//! Integration tests for the debounced search flow.
//!
//! These tests drive a `SearchBox` the way the binary does: configuration from
//! the environment, a debouncer built from it, and simulated typing.

use std::env;
use std::time::Duration;

use lull_core::Debouncer;
use lull_demo::{simulate_typing, Config, SearchBox};
use serial_test::serial;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

// =============================================================================
// Test Helpers
// =============================================================================

/// Builds a search box from the environment with a short quiet period.
fn search_box_from_env(delay_ms: &str) -> (SearchBox, mpsc::UnboundedReceiver<String>) {
    env::set_var("LULL_DELAY_MS", delay_ms);
    let config = Config::from_env().expect("valid configuration");
    env::remove_var("LULL_DELAY_MS");

    let (tx, rx) = mpsc::unbounded_channel();
    (SearchBox::with_updates(Debouncer::new(config.delay), tx), rx)
}

/// Collects every update that arrives within `window`.
async fn drain(rx: &mut mpsc::UnboundedReceiver<String>, window: Duration) -> Vec<String> {
    let mut applied = Vec::new();
    while let Ok(Some(query)) = timeout(window, rx.recv()).await {
        applied.push(query);
    }
    applied
}

// =============================================================================
// Flow Tests
// =============================================================================

/// Typing faster than the quiet period searches for the whole word once.
#[tokio::test]
#[serial]
async fn test_fast_typing_searches_once() {
    let (mut search, mut rx) = search_box_from_env("100");

    simulate_typing(&mut search, "debounce", Duration::from_millis(10)).await;

    let applied = drain(&mut rx, Duration::from_millis(250)).await;
    assert_eq!(applied, vec!["debounce".to_string()]);
    assert_eq!(search.query(), "debounce");
}

/// Typing slower than the quiet period searches for every prefix.
#[tokio::test]
#[serial]
async fn test_slow_typing_searches_every_prefix() {
    let (mut search, mut rx) = search_box_from_env("30");

    simulate_typing(&mut search, "abc", Duration::from_millis(90)).await;

    let applied = drain(&mut rx, Duration::from_millis(150)).await;
    assert_eq!(applied, vec!["a", "ab", "abc"]);
}

/// Text replaced wholesale (paste, clear) still settles on the latest value.
#[tokio::test]
#[serial]
async fn test_clearing_field_settles_on_empty_query() {
    let (mut search, mut rx) = search_box_from_env("60");

    search.on_change("something");
    sleep(Duration::from_millis(120)).await;
    search.on_change("some");
    search.on_change("");

    let applied = drain(&mut rx, Duration::from_millis(200)).await;
    assert_eq!(applied, vec!["something", ""]);
    assert_eq!(search.query(), "");
    assert_eq!(search.text(), "");
}

/// Dropping the search box mid-burst never applies the pending query.
#[tokio::test]
#[serial]
async fn test_drop_discards_pending_query() {
    let (mut search, mut rx) = search_box_from_env("80");

    search.on_change("never");
    drop(search);

    let applied = drain(&mut rx, Duration::from_millis(200)).await;
    assert!(applied.is_empty());
}
