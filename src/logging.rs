//! Logging setup, powered by tracing-subscriber
//!
//! `RUST_LOG` takes precedence over the configured level when set.

use thiserror::Error;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Build the filter from the base level with noisy dependencies turned down.
pub fn build_env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }

    let mut directives = vec![level.to_string()];
    let noisy: &[(&str, &str)] = &[("tokio_postgres", "warn"), ("hyper", "warn")];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    let filter = directives.join(",");
    EnvFilter::try_new(&filter).map_err(|e| LoggingError::InvalidFilter {
        filter,
        reason: e.to_string(),
    })
}

/// Install the global subscriber writing compact lines to stderr.
pub fn init_logging(level: &str) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level)?)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
