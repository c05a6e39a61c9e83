//! Lull Demo - search-as-you-type driver.
//!
//! Feeds text changes into a debounced search field and prints the query the
//! field settles on.
//!
//! # Commands
//!
//! - `lull-demo type <TEXT>`: Simulate typing `TEXT` one character at a time
//! - `lull-demo stdin`: Treat each line of stdin as the new field contents
//!
//! # Environment Variables
//!
//! See the [`config`](lull_demo::config) module for available options.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lull_core::Debouncer;
use lull_demo::config::Config;
use lull_demo::search::{simulate_typing, SearchBox};

/// Extra wait after the quiet period so the final update has landed.
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

/// Lull Demo - debounced search field.
#[derive(Parser, Debug)]
#[command(name = "lull-demo")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    LULL_DELAY_MS      Quiet period in milliseconds (default: 1000)
    LULL_KEYSTROKE_MS  Delay between simulated keystrokes (default: 100)
    RUST_LOG           Log filter (default: info)

EXAMPLES:
    # Type fast enough that only the final word is searched
    lull-demo type hello --keystroke-ms 50

    # Pause longer than the quiet period between keystrokes
    lull-demo type abc --keystroke-ms 1200

    # Drive the field from another program
    printf 'r\\nru\\nrus\\nrust\\n' | lull-demo stdin
")]
struct Cli {
    /// Quiet period in milliseconds (overrides LULL_DELAY_MS).
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Delay between simulated keystrokes (overrides LULL_KEYSTROKE_MS).
    #[arg(long, global = true)]
    keystroke_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate typing TEXT into the search field.
    Type {
        /// Text to type, one character per keystroke.
        text: String,
    },

    /// Read field contents from stdin, one value per line.
    Stdin,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::from_env()
        .context("Failed to load configuration")?
        .with_overrides(cli.delay_ms, cli.keystroke_ms)
        .context("Invalid command-line option")?;

    info!(
        delay_ms = config.delay.as_millis(),
        keystroke_ms = config.keystroke_interval.as_millis(),
        "Lull demo starting"
    );

    let (updates_tx, updates_rx) = mpsc::unbounded_channel();
    let debouncer = Debouncer::try_new(config.delay).context("Failed to create debouncer")?;
    let mut search = SearchBox::with_updates(debouncer, updates_tx);
    let printer = tokio::spawn(print_updates(updates_rx));

    match cli.command {
        Command::Type { text } => {
            simulate_typing(&mut search, &text, config.keystroke_interval).await;
        }
        Command::Stdin => read_stdin(&mut search).await?,
    }

    // Let the last pending query fire before reporting.
    tokio::time::sleep(search.delay() + SETTLE_MARGIN).await;
    println!("Searching for: {}", search.query());

    // Dropping the search box closes the update channel and ends the printer.
    drop(search);
    printer.await.context("Update printer panicked")?;

    Ok(())
}

/// Feeds each stdin line into the search field until EOF.
async fn read_stdin(search: &mut SearchBox) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        search.on_change(line);
    }

    debug!("Stdin closed");
    Ok(())
}

/// Prints each query as the debouncer applies it.
async fn print_updates(mut updates: mpsc::UnboundedReceiver<String>) {
    while let Some(query) = updates.recv().await {
        println!("applied: {query}");
    }
}

/// Initializes the logging subsystem.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
