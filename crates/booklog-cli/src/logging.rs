//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout carries only the
//! batch summary.

use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log format: {0} (expected: text|json)")]
    InvalidFormat(String),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter expression from `--log-level`; overrides `RUST_LOG`
    pub level: Option<String>,
}

impl LoggingConfig {
    /// Build the event filter
    ///
    /// Precedence: explicit level, then `RUST_LOG`, then [`DEFAULT_LEVEL`].
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        match &self.level {
            Some(level) => {
                EnvFilter::try_new(level).map_err(|_| LoggingError::InvalidLevel(level.clone()))
            }
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))),
        }
    }
}

/// Install the global subscriber
pub fn init_logging(cfg: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = cfg.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match cfg.format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };

    installed.map_err(|_| LoggingError::AlreadyInitialized)
}
