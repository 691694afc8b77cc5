//! Batch runs over identifier files.
//!
//! These tests drive BatchDriver::run_file end to end against the
//! in-memory catalog:
//! - a failing line is reported and the batch carries on
//! - pacing happens between lines, never before the first
//! - ISBN mode costs one extra search per line
//! - only the identifier file itself can fail the whole run, never the
//!   content of a single line

use async_trait::async_trait;
use booklog_core::{BatchDriver, BatchError, IdMode, ItemError, NoDelay, Pacer, TagOperation};
use booklog_test_utils::{id_file, tags, CatalogCall, InMemoryCatalog};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct CountingPacer {
    pauses: AtomicUsize,
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

fn shelf() -> Arc<InMemoryCatalog> {
    Arc::new(
        InMemoryCatalog::new()
            .with_isbn("9784101010014", "1001", &["novel"])
            .with_isbn("9784003101018", "1002", &["poetry", "loc_attic"])
            .with_isbn("9784167110017", "1003", &["loc_desk"]),
    )
}

#[tokio::test]
async fn failing_line_does_not_stop_the_batch() {
    let catalog = shelf();
    let file = id_file(&["1001", "missing", "1003"]);

    let driver = BatchDriver::new(catalog.clone(), IdMode::ItemId).with_pacer(Arc::new(NoDelay));
    let report = driver
        .run_file(file.path(), &TagOperation::AddTag("2024".to_string()))
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].line, 2);
    assert_eq!(report.failures[0].identifier, "missing");
    assert!(matches!(report.failures[0].error, ItemError::Fetch(ref e) if e.is_not_found()));

    assert_eq!(catalog.tags_of("1001"), Some(tags(&["novel", "2024"])));
    assert_eq!(catalog.tags_of("1003"), Some(tags(&["loc_desk", "2024"])));
}

#[tokio::test]
async fn location_batch_by_isbn() {
    let catalog = shelf();
    let file = id_file(&["9784101010014", "9784003101018", "9784167110017"]);

    let driver = BatchDriver::new(catalog.clone(), IdMode::Isbn).with_pacer(Arc::new(NoDelay));
    let report = driver
        .run_file(file.path(), &TagOperation::SetLocation("desk".to_string()))
        .await
        .unwrap();

    assert_eq!(report.updated, 2);
    assert_eq!(report.unchanged, 1);
    assert!(report.is_clean());

    assert_eq!(catalog.tags_of("1001"), Some(tags(&["novel", "loc_desk"])));
    assert_eq!(catalog.tags_of("1002"), Some(tags(&["poetry", "loc_desk"])));
    assert_eq!(catalog.tags_of("1003"), Some(tags(&["loc_desk"])));

    // resolve + fetch for each of the three lines
    assert_eq!(catalog.fetch_count(), 6);
    assert_eq!(catalog.writes().len(), 2);
}

#[tokio::test]
async fn item_id_mode_searches_once_per_line() {
    let catalog = shelf();
    let file = id_file(&["1001", "1002"]);

    let driver = BatchDriver::new(catalog.clone(), IdMode::ItemId).with_pacer(Arc::new(NoDelay));
    driver
        .run_file(file.path(), &TagOperation::AddTag("novel".to_string()))
        .await
        .unwrap();

    assert_eq!(
        catalog.calls(),
        vec![
            CatalogCall::Fetch("1001".to_string()),
            CatalogCall::Fetch("1002".to_string()),
            CatalogCall::Write {
                item_id: "1002".to_string(),
                tags: tags(&["poetry", "loc_attic", "novel"]),
            },
        ]
    );
}

#[tokio::test]
async fn pacing_runs_between_lines() {
    let catalog = shelf();
    let pacer = Arc::new(CountingPacer::default());
    let file = id_file(&["1001", "nope", "1002", "1003"]);

    let driver = BatchDriver::new(catalog, IdMode::ItemId).with_pacer(pacer.clone());
    let report = driver
        .run_file(file.path(), &TagOperation::AddTag("x".to_string()))
        .await
        .unwrap();

    assert_eq!(report.processed(), 4);
    assert_eq!(pacer.pauses.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn empty_file_is_an_empty_report() {
    let catalog = shelf();
    let pacer = Arc::new(CountingPacer::default());
    let file = id_file(&[]);

    let driver = BatchDriver::new(catalog.clone(), IdMode::ItemId).with_pacer(pacer.clone());
    let report = driver
        .run_file(file.path(), &TagOperation::AddTag("x".to_string()))
        .await
        .unwrap();

    assert_eq!(report.processed(), 0);
    assert_eq!(pacer.pauses.load(Ordering::SeqCst), 0);
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn failed_writes_are_reported_per_line() {
    let catalog = Arc::new(
        InMemoryCatalog::new()
            .with_record("1", &[])
            .with_record("2", &[])
            .failing_write("1", 401),
    );
    let file = id_file(&["1", "2"]);

    let driver = BatchDriver::new(catalog.clone(), IdMode::ItemId).with_pacer(Arc::new(NoDelay));
    let report = driver
        .run_file(file.path(), &TagOperation::AddTag("x".to_string()))
        .await
        .unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.failed(), 1);
    assert!(report.failures[0].error.catalog_error().is_auth_failure());
    assert_eq!(catalog.tags_of("2"), Some(tags(&["x"])));
}

#[tokio::test]
async fn missing_file_fails_the_run() {
    let catalog = shelf();
    let driver = BatchDriver::new(catalog.clone(), IdMode::ItemId).with_pacer(Arc::new(NoDelay));

    let err = driver
        .run_file(
            Path::new("/nonexistent/booklog/ids.txt"),
            &TagOperation::AddTag("x".to_string()),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BatchError::Open { .. }));
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn undecodable_line_fails_alone() {
    let catalog = Arc::new(
        InMemoryCatalog::new()
            .with_record("1001", &[])
            .with_record("1003", &[]),
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"1001\n\xff\xfe-bad\n1003\n").unwrap();
    file.flush().unwrap();

    let driver = BatchDriver::new(catalog.clone(), IdMode::ItemId).with_pacer(Arc::new(NoDelay));
    let report = driver
        .run_file(file.path(), &TagOperation::AddTag("x".to_string()))
        .await
        .unwrap();

    assert_eq!(report.updated, 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].line, 2);
    assert_eq!(catalog.tags_of("1003"), Some(tags(&["x"])));
}
