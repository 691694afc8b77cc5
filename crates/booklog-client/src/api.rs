//! Catalog access trait

use crate::error::CatalogError;
use async_trait::async_trait;

/// A record as returned by a catalog search
///
/// Fetched fresh for every operation and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// booklog's internal item ID
    pub item_id: String,
    /// Current tags, in service order
    pub tags: Vec<String>,
}

impl BookRecord {
    /// Create a record
    #[must_use]
    pub fn new(item_id: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            item_id: item_id.into(),
            tags,
        }
    }
}

/// Read and write access to booklog records
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Look up the first record matching `keyword`
    ///
    /// `keyword` may be an item ID or an ISBN; the search endpoint accepts
    /// both.
    ///
    /// # Errors
    /// - `CatalogError::NotFound` if the search returns no records
    /// - `CatalogError::Auth` / `CatalogError::UnexpectedStatus` on HTTP failure
    /// - `CatalogError::Transport` / `CatalogError::Parse` on network or body failure
    async fn fetch_record(&self, keyword: &str) -> Result<BookRecord, CatalogError>;

    /// Replace the complete tag set of `item_id` with `tags`
    ///
    /// This is a full replace. Callers pass every tag the record should keep.
    ///
    /// # Errors
    /// - `CatalogError::UnexpectedStatus` unless the service answers 201 Created
    async fn write_tags(&self, item_id: &str, tags: &[String]) -> Result<(), CatalogError>;
}
