//! booklog-tool core
//!
//! Drives tag maintenance over a list of identifiers:
//! - Loads (or scaffolds) the session credentials file
//! - Resolves ISBNs to booklog item IDs
//! - Applies a [`TagOperation`] to each record, one at a time
//! - Paces requests and collects per-item failures into a [`BatchReport`]
//!
//! # Example
//!
//! ```rust,ignore
//! use booklog_core::{BatchDriver, IdMode, TagOperation, config};
//! use booklog_client::CatalogClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = config::load_credentials(&config::default_config_path()?)?;
//! let client = CatalogClient::new(credentials)?;
//!
//! let driver = BatchDriver::new(Arc::new(client), IdMode::Isbn);
//! let op = TagOperation::SetLocation("shelf-a".to_string());
//! let report = driver.run_file("isbns.txt".as_ref(), &op).await?;
//!
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod batch;
pub mod config;
pub mod error;
pub mod pacer;
pub mod resolver;

pub use batch::{BatchDriver, BatchReport, ItemFailure, ItemOutcome};
pub use error::{BatchError, ConfigError, ItemError};
pub use pacer::{FixedDelay, NoDelay, Pacer, DEFAULT_DELAY};
pub use resolver::{resolve_item_id, IdMode, ParseIdModeError};

pub use booklog_tags::{Plan, TagOperation};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running batches
    pub use crate::{
        BatchDriver, BatchReport, FixedDelay, IdMode, ItemOutcome, NoDelay, Pacer, TagOperation,
    };
    pub use booklog_client::{CatalogApi, CatalogClient, Credentials};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
