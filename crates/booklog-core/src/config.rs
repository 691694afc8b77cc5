//! Credentials file bootstrap
//!
//! The file lives at `~/.config/booklog-tool/config.json` and holds
//! `{"username": "...", "cookie": "..."}`. A missing file is scaffolded
//! blank so the operator only has to fill in the values.

use crate::error::ConfigError;
use booklog_client::Credentials;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory under `~/.config`
pub const CONFIG_DIR_NAME: &str = "booklog-tool";

/// File name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default credentials file location
///
/// # Errors
/// - `ConfigError::NoHomeDir` if the home directory cannot be determined
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| config_path_in(&home))
        .ok_or(ConfigError::NoHomeDir)
}

/// Credentials file location under `home`
#[must_use]
pub fn config_path_in(home: &Path) -> PathBuf {
    home.join(".config").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Load credentials, scaffolding a blank file if none exists
///
/// # Errors
/// - `ConfigError::Missing` after writing a blank file to `path`
/// - `ConfigError::Invalid` if `username` or `cookie` is empty
/// - `ConfigError::Malformed` if the file is not valid JSON
/// - `ConfigError::Io` on filesystem failures
pub fn load_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            scaffold(path)?;
            tracing::info!(path = %path.display(), "wrote blank config");
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(ConfigError::io_error(path, e)),
    };

    let credentials: Credentials =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    if !credentials.is_complete() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            missing: credentials.missing_fields(),
        });
    }

    tracing::debug!(path = %path.display(), username = %credentials.username, "loaded credentials");
    Ok(credentials)
}

/// Write a blank credentials file, creating parent directories
fn scaffold(path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| ConfigError::io_error(dir, e))?;
    }

    let blank = serde_json::to_string(&Credentials::default()).map_err(|source| {
        ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut file = open_private(path).map_err(|e| ConfigError::io_error(path, e))?;
    writeln!(file, "{blank}").map_err(|e| ConfigError::io_error(path, e))?;
    Ok(())
}

// The file will hold a session cookie.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new().write(true).create_new(true).open(path)
}
