//! Logging initialisation for the server process.
//!
//! The verbosity policy lives in an explicit [`TelemetrySettings`] value
//! derived from the configuration and passed to [`init`] at startup, rather
//! than being read from module-level state. Structured JSON logs only.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Explicit logging configuration consumed by [`init`].
#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    /// Tracing filter directive applied when `RUST_LOG` is not set.
    pub log_level: String,
}

impl TelemetrySettings {
    /// Derive settings from the loaded configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            log_level: cfg.log_level(),
        }
    }
}

/// Install the tracing subscriber for the process lifetime.
///
/// Outputs structured JSON logs to stdout at the configured level; a
/// `RUST_LOG` environment filter takes precedence when set.
///
/// # Errors
///
/// Returns an error if a subscriber has already been installed.
pub fn init(settings: &TelemetrySettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
