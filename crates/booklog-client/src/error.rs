//! Error types for catalog access
//!
//! Every variant is a per-record failure: the batch driver reports it and
//! moves on to the next identifier.

/// Catalog request errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Search returned an empty result list
    #[error("book not found: {keyword:?}")]
    NotFound {
        /// Keyword that matched nothing
        keyword: String,
    },

    /// Network failure, timeout, or unreadable body
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),

    /// Session rejected by the service
    #[error("authentication rejected (HTTP {status}); check the session cookie")]
    Auth {
        /// HTTP status code
        status: u16,
    },

    /// Any other non-success status
    #[error("unexpected status code: {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected JSON
    #[error("error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request could not be built from the configured values
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    /// Create not-found error for keyword
    pub fn not_found(keyword: impl Into<String>) -> Self {
        Self::NotFound {
            keyword: keyword.into(),
        }
    }

    /// Map a non-success HTTP status to an error
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth { status },
            _ => Self::UnexpectedStatus { status },
        }
    }

    /// Check if the record simply does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the session credentials were rejected
    ///
    /// Every later request in the same run will fail the same way.
    #[inline]
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}
