//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors raised before any network I/O: bad arguments or credentials.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be opened or parsed.
    #[error("Failed to read config file {}: {reason}", path.display())]
    ConfigFile { path: PathBuf, reason: String },

    /// Neither the environment nor the config file carries an API key.
    #[error("No api_key found in {} (or FLICKR_API_KEY)", path.display())]
    MissingApiKey { path: PathBuf },

    /// The configuration carries a blank API key.
    #[error("API key is empty")]
    EmptyApiKey,

    /// Year/month/day do not name a calendar date.
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The configured timezone name is not in the zone database.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A day boundary falls into a DST gap and has no local representation.
    #[error("Local time {local} does not exist in {zone}")]
    NonexistentLocalTime { local: String, zone: String },

    /// The API base URL could not be parsed.
    #[error("Invalid API base URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),
}

/// Failure to obtain one page from upstream.
///
/// Only `MalformedBody` is transient; the page fetcher retries it and
/// escalates to `Exhausted`. Every other variant is returned as-is.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] ReqwestError),

    /// Upstream answered with a status other than 200.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered with a well-formed `stat: fail` body.
    #[error("Flickr API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The body could not be parsed as a search response.
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Every attempt produced a malformed body.
    #[error("Upstream unavailable: response still malformed after {attempts} attempts")]
    Exhausted { attempts: usize },
}

impl FetchError {
    /// Whether the fetcher should re-send the identical request.
    pub fn is_retriable(&self) -> bool {
        matches!(self, FetchError::MalformedBody(_))
    }
}

/// Errors writing the CSV artifact.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Creating the output directory tree failed.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Creating or writing the CSV file failed.
    #[error("Failed to write CSV {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// Flushing the CSV file failed.
    #[error("Failed to flush CSV {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that abort a harvest run.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// A page could not be fetched; the run is aborted without output.
    #[error("Failed to fetch page {page}: {source}")]
    Upstream {
        page: u32,
        #[source]
        source: FetchError,
    },

    /// A photo record lacks a field the output cannot do without.
    #[error("Malformed photo record on page {page}: {reason}")]
    MalformedRecord { page: u32, reason: String },

    /// Writing the result set failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_malformed_body_is_retriable() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(FetchError::MalformedBody(parse_err).is_retriable());
        assert!(!FetchError::Status {
            status: 503,
            body: String::new()
        }
        .is_retriable());
        assert!(!FetchError::Api {
            code: 100,
            message: "Invalid API Key".into()
        }
        .is_retriable());
        assert!(!FetchError::Exhausted { attempts: 4 }.is_retriable());
    }

    #[test]
    fn test_exhausted_message_mentions_upstream() {
        let err = HarvestError::Upstream {
            page: 3,
            source: FetchError::Exhausted { attempts: 4 },
        };
        let msg = format!("{:#}", anyhow::Error::from(err));
        assert!(msg.contains("page 3"));
        assert!(msg.contains("Upstream unavailable"));
        assert!(msg.contains("4 attempts"));
    }

    #[test]
    fn test_invalid_date_display_is_zero_padded() {
        let err = ConfigError::InvalidDate {
            year: 2021,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "Invalid date: 2021-02-30");
    }
}
