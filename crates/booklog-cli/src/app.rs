//! Top-level run flow

use crate::cli::Invocation;
use anyhow::{Context, Result};
use booklog_client::{CatalogClient, ClientConfig};
use booklog_core::{config, BatchDriver, BatchReport, FixedDelay};
use std::sync::Arc;

/// Environment variable overriding the catalog endpoint
pub const BASE_URL_ENV: &str = "BOOKLOG_BASE_URL";

/// Load credentials and run the batch described by `invocation`
///
/// Per-item failures land in the returned report. Only configuration,
/// client setup, and identifier-file errors fail the run.
pub async fn run(invocation: &Invocation) -> Result<BatchReport> {
    let config_path = match &invocation.config_path {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };

    let credentials = config::load_credentials(&config_path).map_err(|e| {
        if e.is_scaffolded() {
            anyhow::Error::new(e)
        } else {
            anyhow::Error::new(e).context("error loading config file")
        }
    })?;

    let mut client_config = ClientConfig::new();
    if let Some(base_url) = &invocation.base_url {
        client_config = client_config.with_base_url(base_url.as_str());
    }
    let client = CatalogClient::with_config(credentials, client_config)
        .context("error creating HTTP client")?;
    tracing::debug!(base_url = client.base_url(), "catalog client ready");

    let pacer = FixedDelay::new(invocation.delay);
    tracing::debug!(delay = ?pacer.delay(), "pacing between identifiers");

    let driver = BatchDriver::new(Arc::new(client), invocation.mode).with_pacer(Arc::new(pacer));

    let report = driver
        .run_file(&invocation.file, &invocation.operation)
        .await?;
    Ok(report)
}
