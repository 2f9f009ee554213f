//! Logging setup for the command-line front end.
//!
//! ## Purpose
//!
//! The library itself only emits `tracing` events. The binary resolves a
//! [`LevelFilter`] from its flags and installs one stderr subscriber with
//! [`init`] before any estimation runs.
//!
//! ## Invariants
//!
//! * An explicit level overrides `RUST_LOG`.
//! * Without either, only warnings and errors are shown.

// External dependencies
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// Internal dependencies
use crate::primitives::errors::KrigerError;

/// Level shown when neither a flag nor `RUST_LOG` selects one.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Install the global stderr subscriber.
pub fn init(level: Option<LevelFilter>) -> Result<(), KrigerError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| KrigerError::Logger(format!("failed to set subscriber: {e}")))
}

/// Filter for an optional explicit level, falling back to `RUST_LOG`, then
/// [`DEFAULT_LEVEL`].
pub fn env_filter(level: Option<LevelFilter>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL.to_string())),
    }
}

/// Parse a `--log-level` value.
pub fn parse_level(level: &str) -> Result<LevelFilter, KrigerError> {
    let level = level.trim();
    if level.is_empty() {
        return Err(KrigerError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| KrigerError::Logger(format!("unrecognised log level: '{level}'")))
}

/// Map a `-v` count to a level above the default: info, debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}
