//! Batch driver
//!
//! Applies one [`TagOperation`] to every identifier in a newline-delimited
//! file. Records are processed strictly one after another:
//!
//! 1. Resolve the identifier to an item ID (a search in ISBN mode)
//! 2. Fetch the record's current tags
//! 3. Plan the change
//! 4. Write the planned tags, or skip if nothing changes
//! 5. Report the outcome and pause before the next line
//!
//! A failing record never stops the batch. Only losing access to the
//! identifier file does.

use crate::error::{BatchError, ItemError};
use crate::pacer::{FixedDelay, Pacer};
use crate::resolver::IdMode;
use booklog_client::CatalogApi;
use booklog_tags::{Plan, TagOperation};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Result of processing one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// New tags were written
    Updated {
        /// Resolved item ID
        item_id: String,
        /// Complete tag set written
        tags: Vec<String>,
    },
    /// Record already had the tag; nothing written
    Unchanged {
        /// Resolved item ID
        item_id: String,
    },
}

impl ItemOutcome {
    /// Resolved item ID
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            Self::Updated { item_id, .. } | Self::Unchanged { item_id } => item_id,
        }
    }
}

/// A failed line in a batch
#[derive(Debug)]
pub struct ItemFailure {
    /// 1-based line number in the identifier file
    pub line: usize,
    /// Identifier as read from the file
    pub identifier: String,
    /// What went wrong
    pub error: ItemError,
}

/// Summary of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records that received new tags
    pub updated: usize,
    /// Records that already carried the tag
    pub unchanged: usize,
    /// Lines that failed, in file order
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    /// Lines processed
    #[inline]
    #[must_use]
    pub fn processed(&self) -> usize {
        self.succeeded() + self.failed()
    }

    /// Lines that ended updated or already set
    #[inline]
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.updated + self.unchanged
    }

    /// Lines that failed
    #[inline]
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Check if every line succeeded
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, line: usize, identifier: &str, result: Result<ItemOutcome, ItemError>) {
        match result {
            Ok(ItemOutcome::Updated { .. }) => self.updated += 1,
            Ok(ItemOutcome::Unchanged { .. }) => self.unchanged += 1,
            Err(error) => self.failures.push(ItemFailure {
                line,
                identifier: identifier.to_string(),
                error,
            }),
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} identifiers: {} updated, {} already set, {} failed",
            self.processed(),
            self.updated,
            self.unchanged,
            self.failed()
        )
    }
}

/// Sequential tag updater
pub struct BatchDriver {
    catalog: Arc<dyn CatalogApi>,
    pacer: Arc<dyn Pacer>,
    mode: IdMode,
}

impl fmt::Debug for BatchDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchDriver").field("mode", &self.mode).finish_non_exhaustive()
    }
}

impl BatchDriver {
    /// Create driver with the default 500 ms pacing
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogApi>, mode: IdMode) -> Self {
        Self {
            catalog,
            pacer: Arc::new(FixedDelay::default()),
            mode,
        }
    }

    /// With custom pacing
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Apply `operation` to a single identifier
    ///
    /// In ISBN mode the record is searched twice: once to resolve the item
    /// ID and once by item ID for its current tags.
    ///
    /// # Errors
    /// Returns the failed step wrapped in an [`ItemError`].
    pub async fn apply(
        &self,
        identifier: &str,
        operation: &TagOperation,
    ) -> Result<ItemOutcome, ItemError> {
        let item_id = self
            .mode
            .resolve(self.catalog.as_ref(), identifier)
            .await
            .map_err(ItemError::Resolve)?;

        let record = self
            .catalog
            .fetch_record(&item_id)
            .await
            .map_err(ItemError::Fetch)?;

        match operation.plan(&record.tags) {
            Plan::NoChangeNeeded => Ok(ItemOutcome::Unchanged { item_id }),
            Plan::Write(tags) => {
                self.catalog
                    .write_tags(&item_id, &tags)
                    .await
                    .map_err(ItemError::Write)?;
                Ok(ItemOutcome::Updated { item_id, tags })
            }
        }
    }

    /// Apply `operation` to every line of the file at `path`
    ///
    /// # Errors
    /// - `BatchError::Open` if the file cannot be opened
    /// - `BatchError::Read` if reading stops partway; lines already processed
    ///   stay processed
    pub async fn run_file(
        &self,
        path: &Path,
        operation: &TagOperation,
    ) -> Result<BatchReport, BatchError> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| BatchError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            mode = %self.mode,
            target = %operation.target_tag(),
            "starting batch"
        );
        self.run_reader(BufReader::new(file), operation).await
    }

    /// Apply `operation` to every line read from `reader`
    ///
    /// Lines are passed through as read, blank ones included. `\r\n` line
    /// endings are accepted. Bytes that are not UTF-8 are replaced rather
    /// than rejected, so such a line fails on its own like any other
    /// unknown identifier.
    ///
    /// # Errors
    /// - `BatchError::Read` if the underlying reader fails
    pub async fn run_reader<R>(
        &self,
        reader: R,
        operation: &TagOperation,
    ) -> Result<BatchReport, BatchError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.split(b'\n');
        let mut report = BatchReport::default();
        let mut line_no = 0usize;

        while let Some(raw) = lines.next_segment().await.map_err(BatchError::Read)? {
            let identifier = decode_line(&raw);
            if line_no > 0 {
                self.pacer.pause().await;
            }
            line_no += 1;

            let result = self.apply(&identifier, operation).await;
            log_outcome(operation, &identifier, &result);
            report.record(line_no, &identifier, result);
        }

        tracing::info!(
            processed = report.processed(),
            updated = report.updated,
            unchanged = report.unchanged,
            failed = report.failed(),
            "batch finished"
        );
        Ok(report)
    }
}

fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(line).into_owned()
}

fn log_outcome(operation: &TagOperation, identifier: &str, result: &Result<ItemOutcome, ItemError>) {
    match result {
        Ok(ItemOutcome::Updated { item_id, .. }) => {
            tracing::info!(identifier, "{}: {item_id}", operation.updated_message());
        }
        Ok(ItemOutcome::Unchanged { item_id }) => {
            tracing::info!(identifier, "{}: {item_id}", operation.unchanged_message());
        }
        Err(e) => {
            tracing::warn!(identifier, stage = e.stage(), "Error processing ID {identifier:?}: {e}");
            if e.catalog_error().is_auth_failure() {
                tracing::warn!("session cookie rejected; remaining items will likely fail too");
            }
        }
    }
}
