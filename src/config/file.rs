//! Credential loading.
//!
//! The API key lives in a small key-value file (`api_key = 0123abcd`) next to
//! the binary's working directory. The file uses the same `key = value`
//! syntax as a `.env` file, so it is read with `dotenvy`'s parser. The
//! `FLICKR_API_KEY` environment variable takes precedence when set.

use std::path::Path;

use crate::config::constants::{API_KEY_ENV, API_KEY_NAME};
use crate::error_handling::ConfigError;

/// Resolves the API key from the environment or the given config file.
///
/// # Errors
///
/// Returns `ConfigError::ConfigFile` if the file cannot be read or parsed, and
/// `ConfigError::MissingApiKey` if neither source provides a non-empty key.
pub fn load_api_key(path: &Path) -> Result<String, ConfigError> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        let key = key.trim();
        if !key.is_empty() {
            log::debug!("Using API key from {}", API_KEY_ENV);
            return Ok(key.to_string());
        }
    }

    read_api_key(path)
}

/// Reads `api_key` from a key-value file, ignoring the environment.
pub fn read_api_key(path: &Path) -> Result<String, ConfigError> {
    let entries = dotenvy::from_path_iter(path).map_err(|e| ConfigError::ConfigFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for entry in entries {
        let (key, value) = entry.map_err(|e| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if key == API_KEY_NAME {
            let value = value.trim();
            if value.is_empty() {
                break;
            }
            return Ok(value.to_string());
        }
    }

    Err(ConfigError::MissingApiKey {
        path: path.to_path_buf(),
    })
}
