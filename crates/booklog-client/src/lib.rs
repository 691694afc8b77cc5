//! booklog catalog client
//!
//! Authenticated access to the two booklog.jp endpoints the tool needs:
//!
//! - **Search**: look up a record's item ID and current tags by keyword
//!   (item ID or ISBN)
//! - **Tag update**: replace a record's complete tag set
//!
//! [`CatalogApi`] is the seam the rest of the workspace programs against;
//! [`CatalogClient`] is the reqwest-backed implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use booklog_client::{CatalogApi, CatalogClient, Credentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new(Credentials::new("reader", "session-token"))?;
//!
//! let record = client.fetch_record("9784101010014").await?;
//! let mut tags = record.tags.clone();
//! tags.push("classic".to_string());
//! client.write_tags(&record.item_id, &tags).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod api;
pub mod client;
pub mod credentials;
pub mod error;

pub use api::{BookRecord, CatalogApi};
pub use client::{CatalogClient, ClientConfig, DEFAULT_BASE_URL};
pub use credentials::Credentials;
pub use error::CatalogError;

#[cfg(any(test, feature = "mock"))]
pub use api::MockCatalogApi;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
