//! Structured logging bootstrap.

use crate::config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors returned while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive is malformed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Installs the global `tracing` subscriber.
///
/// Valid `RUST_LOG` directives take precedence over [`LoggingConfig::level`].
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for a malformed filter and
/// [`TelemetryError::Install`] when a subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(directives.as_deref(), &config.level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = match config.format {
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(TelemetryError::Install)?;

    tracing::debug!(level = %config.level, format = ?config.format, "tracing initialised");
    Ok(())
}

/// Builds the filter from `RUST_LOG` directives, falling back to `level`
/// when they are missing or fail to parse.
fn build_filter(
    env_directives: Option<&str>,
    level: &str,
) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    env_directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .map_or_else(|| EnvFilter::try_new(level), Ok)
}
