//! Logging initialization.

use std::sync::Once;

use clap::ValueEnum;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

const DEFAULT_FILTER: &str = "commander=info";

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` overrides the default `commander=info` filter.
///
/// Only the first call has any effect.
pub fn init(format: LogFormat) {
    INIT_ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        match format {
            LogFormat::Pretty => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .finish()
                .try_init()
                .ok(),
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .finish()
                .try_init()
                .ok(),
        };
    });
}
