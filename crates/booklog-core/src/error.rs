//! Error types for booklog-tool core
//!
//! Provides error handling for:
//! - Credentials file loading and scaffolding (fatal at startup)
//! - Identifier file access (fatal for the batch)
//! - Per-item failures (reported, batch continues)

use booklog_client::CatalogError;
use std::path::PathBuf;

/// Credentials file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No config file existed; a blank one was written
    #[error(
        "config file not found. A blank config has been created at {}\nPlease edit the config file and provide the necessary values.",
        .path.display()
    )]
    Missing { path: PathBuf },

    /// Required values left empty
    #[error("missing required config values in {}: {}", .path.display(), .missing.join(", "))]
    Invalid {
        path: PathBuf,
        missing: Vec<&'static str>,
    },

    /// File is not valid JSON
    #[error("error decoding config file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO error reading or scaffolding the file
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Default path needs a home directory
    #[error("cannot determine user home directory")]
    NoHomeDir,
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if a blank config was just written
    #[inline]
    #[must_use]
    pub fn is_scaffolded(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

/// Identifier file errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// File could not be opened
    #[error("error opening ID file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File stopped being readable partway through
    #[error("error reading ID file: {0}")]
    Read(#[source] std::io::Error),
}

/// Failure to process one identifier
///
/// The variant names the step that failed; the wrapped error says why.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// ISBN lookup failed
    #[error("error getting book info: {0}")]
    Resolve(#[source] CatalogError),

    /// Current tags could not be fetched
    #[error("error getting current tags: {0}")]
    Fetch(#[source] CatalogError),

    /// Tag write was rejected
    #[error("error updating tags: {0}")]
    Write(#[source] CatalogError),
}

impl ItemError {
    /// Underlying catalog error
    #[must_use]
    pub fn catalog_error(&self) -> &CatalogError {
        match self {
            Self::Resolve(e) | Self::Fetch(e) | Self::Write(e) => e,
        }
    }

    /// Name of the failed step
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Fetch(_) => "fetch",
            Self::Write(_) => "write",
        }
    }
}
