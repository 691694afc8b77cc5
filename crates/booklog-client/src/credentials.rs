//! Session credentials

use serde::{Deserialize, Serialize};
use std::fmt;

/// booklog session credentials
///
/// Loaded once at startup and handed to [`crate::CatalogClient`]; never
/// mutated afterwards.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// booklog user name, as it appears in profile URLs
    #[serde(default)]
    pub username: String,
    /// Value of the `bid` session cookie, without the trailing `%3D`
    #[serde(default)]
    pub cookie: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(username: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            cookie: cookie.into(),
        }
    }

    /// Check that both fields are filled in
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.cookie.is_empty()
    }

    /// Names of the fields left empty
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.username.is_empty() {
            missing.push("username");
        }
        if self.cookie.is_empty() {
            missing.push("cookie");
        }
        missing
    }

    /// `Cookie` header value
    ///
    /// booklog stores the session id base64-encoded; the trailing `=` is
    /// sent URL-encoded.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        format!("bid={}%3D", self.cookie)
    }
}

// The cookie is a live session token.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("cookie", &"<redacted>")
            .finish()
    }
}
