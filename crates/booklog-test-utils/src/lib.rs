//! Testing utilities for booklog-tool workspace
//!
//! Shared fakes and fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use booklog_client::{BookRecord, CatalogApi, CatalogError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

/// A request seen by [`InMemoryCatalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    Fetch(String),
    Write { item_id: String, tags: Vec<String> },
}

#[derive(Debug, Clone)]
struct StoredRecord {
    item_id: String,
    isbn: Option<String>,
    tags: Vec<String>,
}

#[derive(Debug, Default)]
struct CatalogState {
    records: Vec<StoredRecord>,
    fetch_failures: HashMap<String, u16>,
    write_failures: HashMap<String, u16>,
    calls: Vec<CatalogCall>,
}

/// In-memory stand-in for the booklog service
///
/// Search matches item IDs and ISBNs exactly and returns the first record
/// inserted. Writes replace the stored tags and are recorded in call order.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(self, item_id: &str, record_tags: &[&str]) -> Self {
        self.state.lock().records.push(StoredRecord {
            item_id: item_id.to_string(),
            isbn: None,
            tags: tags(record_tags),
        });
        self
    }

    #[must_use]
    pub fn with_isbn(self, isbn: &str, item_id: &str, record_tags: &[&str]) -> Self {
        self.state.lock().records.push(StoredRecord {
            item_id: item_id.to_string(),
            isbn: Some(isbn.to_string()),
            tags: tags(record_tags),
        });
        self
    }

    /// Answer searches for `keyword` with an HTTP `status` failure
    #[must_use]
    pub fn failing_fetch(self, keyword: &str, status: u16) -> Self {
        self.state.lock().fetch_failures.insert(keyword.to_string(), status);
        self
    }

    /// Answer writes to `item_id` with an HTTP `status` failure
    #[must_use]
    pub fn failing_write(self, item_id: &str, status: u16) -> Self {
        self.state.lock().write_failures.insert(item_id.to_string(), status);
        self
    }

    pub fn tags_of(&self, item_id: &str) -> Option<Vec<String>> {
        self.state
            .lock()
            .records
            .iter()
            .find(|r| r.item_id == item_id)
            .map(|r| r.tags.clone())
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.state.lock().calls.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, CatalogCall::Fetch(_)))
            .count()
    }

    pub fn writes(&self) -> Vec<(String, Vec<String>)> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                CatalogCall::Write { item_id, tags } => Some((item_id.clone(), tags.clone())),
                CatalogCall::Fetch(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn fetch_record(&self, keyword: &str) -> Result<BookRecord, CatalogError> {
        let mut state = self.state.lock();
        state.calls.push(CatalogCall::Fetch(keyword.to_string()));

        if let Some(status) = state.fetch_failures.get(keyword) {
            return Err(CatalogError::from_status(*status));
        }

        state
            .records
            .iter()
            .find(|r| r.item_id == keyword || r.isbn.as_deref() == Some(keyword))
            .map(|r| BookRecord::new(r.item_id.clone(), r.tags.clone()))
            .ok_or_else(|| CatalogError::not_found(keyword))
    }

    async fn write_tags(&self, item_id: &str, new_tags: &[String]) -> Result<(), CatalogError> {
        let mut state = self.state.lock();
        state.calls.push(CatalogCall::Write {
            item_id: item_id.to_string(),
            tags: new_tags.to_vec(),
        });

        if let Some(status) = state.write_failures.get(item_id) {
            return Err(CatalogError::from_status(*status));
        }

        match state.records.iter_mut().find(|r| r.item_id == item_id) {
            Some(record) => {
                record.tags = new_tags.to_vec();
                Ok(())
            }
            None => Err(CatalogError::from_status(404)),
        }
    }
}

pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Write `lines` to a temporary identifier file, one per line
pub fn id_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}
