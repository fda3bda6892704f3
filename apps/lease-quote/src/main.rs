//! Lease Quote Binary
//!
//! Line-oriented lease calculator. Reads commands from stdin and prints
//! quotes, option lists and the rate table.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin lease-quote
//! > quote 10000 30 6
//! ```
//!
//! # Environment Variables
//!
//! - `LEASE_QUOTE_CONFIG`: Config file path (default: lease-quote.yaml)
//! - `RUST_LOG`: Log filter (default: lease_quote=<observability.logging.level>)

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use lease_quote::application::ports::{InMemorySettingsStore, SettingsStore};
use lease_quote::application::services::{CalculatorPolicy, CalculatorService};
use lease_quote::config::{LoggingConfig, load_config};
use lease_quote::infrastructure::console::ConsoleSession;
use lease_quote::infrastructure::persistence::JsonFileSettingsStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

fn main() -> anyhow::Result<()> {
    let config = load_config(None).context("failed to load configuration")?;
    init_tracing(&config.observability.logging)?;

    let policy = config
        .calculator_policy()
        .context("invalid calculator configuration")?;

    tracing::info!(
        storage_enabled = config.storage.enabled,
        storage_path = %config.storage.path,
        "Starting lease calculator"
    );

    if !config.storage.enabled {
        return run(Arc::new(InMemorySettingsStore::new()), policy);
    }

    match JsonFileSettingsStore::open(&config.storage.path) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "Using settings file");
            run(Arc::new(store), policy)
        }
        Err(e) => {
            tracing::warn!(
                path = %config.storage.path,
                error = %e,
                "Settings file unusable, settings will not be persisted"
            );
            run(Arc::new(InMemorySettingsStore::new()), policy)
        }
    }
}

/// Initialize tracing from the logging configuration.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let directive: Directive = format!("lease_quote={}", logging.level)
        .parse()
        .with_context(|| format!("invalid log level '{}'", logging.level))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
    Ok(())
}

/// Drive a console session over stdin until EOF or `quit`.
fn run<S: SettingsStore>(store: Arc<S>, policy: CalculatorPolicy) -> anyhow::Result<()> {
    let service = CalculatorService::new(store, policy);
    let mut session = ConsoleSession::new(service);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "lease calculator ready, type 'help' for commands")?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        let reply = session.handle(&line);
        for output in &reply.lines {
            writeln!(stdout, "{output}")?;
        }
        stdout.flush()?;
        if reply.quit {
            break;
        }
    }

    tracing::info!("Lease calculator stopped");
    Ok(())
}
