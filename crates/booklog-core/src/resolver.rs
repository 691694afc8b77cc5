//! Identifier resolution
//!
//! Batch files hold either booklog item IDs or ISBNs. Item IDs are used as
//! given; ISBNs cost one extra search to find the item ID.

use booklog_client::{CatalogApi, CatalogError};
use std::fmt;
use std::str::FromStr;

/// How identifiers in a batch file are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdMode {
    /// booklog item IDs
    #[default]
    ItemId,
    /// ISBNs, resolved through a catalog search
    Isbn,
}

impl IdMode {
    /// Every mode, in CLI order
    pub const ALL: [IdMode; 2] = [IdMode::ItemId, IdMode::Isbn];

    /// CLI spelling
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IdMode::ItemId => "itemid",
            IdMode::Isbn => "isbn",
        }
    }

    /// Turn a batch identifier into an item ID
    ///
    /// # Errors
    /// Propagates the catalog error of the ISBN lookup unchanged.
    pub async fn resolve(
        self,
        catalog: &dyn CatalogApi,
        identifier: &str,
    ) -> Result<String, CatalogError> {
        match self {
            IdMode::ItemId => Ok(identifier.to_string()),
            IdMode::Isbn => resolve_item_id(catalog, identifier).await,
        }
    }
}

impl fmt::Display for IdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown `--id` value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ID type: {0} (expected: itemid|isbn)")]
pub struct ParseIdModeError(pub String);

impl FromStr for IdMode {
    type Err = ParseIdModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "itemid" => Ok(IdMode::ItemId),
            "isbn" => Ok(IdMode::Isbn),
            other => Err(ParseIdModeError(other.to_string())),
        }
    }
}

/// Look up the item ID of the first record matching `isbn`
///
/// # Errors
/// Propagates `NotFound`, `Transport`, and the other catalog errors unchanged.
pub async fn resolve_item_id(catalog: &dyn CatalogApi, isbn: &str) -> Result<String, CatalogError> {
    let record = catalog.fetch_record(isbn).await?;
    tracing::debug!(isbn, item_id = %record.item_id, "resolved ISBN");
    Ok(record.item_id)
}
