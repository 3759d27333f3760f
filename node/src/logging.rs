//! Logging setup for the registry node.
//!
//! Output is structured `tracing` with a choice of human or JSON rendering.
//! A `RUST_LOG` environment variable takes precedence over the configured
//! level, so an operator can raise verbosity for one run without touching
//! the configuration file.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rendering for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for a terminal.
    Human,
    /// Newline-delimited JSON for log pipelines.
    Json,
}

impl LogFormat {
    /// Parse a configuration string; anything but "json" means human output.
    pub fn from_config(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Human,
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Human => registry
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .init(),
    }
}
