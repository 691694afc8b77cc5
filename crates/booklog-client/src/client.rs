//! reqwest-backed catalog client
//!
//! booklog has no public API; the tool drives the same endpoints the web
//! UI calls. Both requests carry the session cookie, a `Referer` naming the
//! user's profile page, and the `X-Requested-With` marker the service
//! expects from its own XHR calls.

use crate::api::{BookRecord, CatalogApi};
use crate::credentials::Credentials;
use crate::error::CatalogError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, REFERER};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Production service root
pub const DEFAULT_BASE_URL: &str = "https://booklog.jp";

/// `service_id` for books in the tag endpoint
const SERVICE_ID: &str = "1";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// HTTP settings for [`CatalogClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With service root
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// With per-request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("booklog-tool/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Search endpoint response body
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    books: Vec<SearchBook>,
}

#[derive(Debug, Deserialize)]
struct SearchBook {
    id: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl SearchBook {
    fn into_record(self) -> BookRecord {
        BookRecord::new(self.id, self.tags.unwrap_or_default())
    }
}

/// Catalog client for one booklog account
///
/// Holds a single reusable connection pool. Credentials are fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
    credentials: Credentials,
}

impl CatalogClient {
    /// Create client against the production service
    ///
    /// # Errors
    /// - `CatalogError::Transport` if the HTTP client cannot be initialized
    pub fn new(credentials: Credentials) -> Result<Self, CatalogError> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create client with explicit HTTP settings
    ///
    /// # Errors
    /// - `CatalogError::Transport` if the HTTP client cannot be initialized
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    /// Service root this client talks to
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Profile page of the configured user, sent as `Referer`
    #[must_use]
    pub fn profile_url(&self) -> String {
        format!("{}/users/{}", self.config.base_url, self.credentials.username)
    }

    fn search_url(&self) -> String {
        format!("{}/all", self.profile_url())
    }

    fn tag_url(&self) -> String {
        format!("{}/api/book/tag", self.config.base_url)
    }

    fn session_headers(&self) -> Result<HeaderMap, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, header_value(&self.credentials.cookie_header())?);
        headers.insert(REFERER, header_value(&self.profile_url())?);
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        Ok(headers)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_record(&self, keyword: &str) -> Result<BookRecord, CatalogError> {
        tracing::debug!(keyword, "searching catalog");

        let response = self
            .http
            .get(self.search_url())
            .query(&search_query(keyword))
            .headers(self.session_headers()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::from_status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        let record = parsed
            .books
            .into_iter()
            .next()
            .map(SearchBook::into_record)
            .ok_or_else(|| CatalogError::not_found(keyword))?;

        tracing::debug!(keyword, item_id = %record.item_id, tags = record.tags.len(), "catalog hit");
        Ok(record)
    }

    async fn write_tags(&self, item_id: &str, tags: &[String]) -> Result<(), CatalogError> {
        let joined = tags.join(" ");
        tracing::debug!(item_id, tags = %joined, "writing tags");

        // Set after `form` so the charset-qualified type replaces the default
        let mut headers = self.session_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        let response = self
            .http
            .post(self.tag_url())
            .form(&[
                ("service_id", SERVICE_ID),
                ("id", item_id),
                ("tags", joined.as_str()),
            ])
            .headers(headers)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(CatalogError::from_status(status.as_u16())),
        }
    }
}

/// Query string for the search endpoint
///
/// Everything except `keyword` is a fixed filter selecting the whole shelf,
/// newest first, as JSON.
fn search_query(keyword: &str) -> [(&'static str, &str); 10] {
    [
        ("category_id", "all"),
        ("status", "all"),
        ("sort", "sort_desc"),
        ("rank", "all"),
        ("tag", ""),
        ("page", "1"),
        ("keyword", keyword),
        ("reviewed", ""),
        ("quoted", ""),
        ("json", "true"),
    ]
}

fn header_value(value: &str) -> Result<HeaderValue, CatalogError> {
    HeaderValue::from_str(value)
        .map_err(|e| CatalogError::InvalidRequest(format!("invalid header value: {e}")))
}
