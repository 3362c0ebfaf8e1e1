//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FLICKR_API_BASE, PAGE_DELAY,
    RETRY_DELAY, RETRY_MAX_ATTEMPTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How strictly the taken-date window is enforced.
///
/// Upstream's own `min_taken_date`/`max_taken_date` filter admits records just
/// outside the requested day, so `Strict` re-checks every record locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterMode {
    /// Discard records whose taken time falls outside the local day
    Strict,
    /// Keep everything upstream returns
    TrustUpstream,
}

/// Output path convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputLayout {
    /// `<root>/<yyyy>/<mm>/<dd>/<yyyy>-<mm>-<dd>-vancouver_geo-flickr-metadata.csv`
    Dated,
    /// `<root>/<yyyy>-<mm>-<dd>-has_geo-flickr-metadata.csv`
    Flat,
}

/// Encoding of the taken-date window bounds sent upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WindowFormat {
    /// `YYYY-MM-DD HH:MM:SS` in the search timezone
    LocalTime,
    /// Unix epoch seconds (upstream handles these unreliably)
    Epoch,
}

/// Command-line interface of the harvester binary.
///
/// The date arguments are optional so that a bare invocation can print the
/// short usage line and exit successfully instead of failing argument parsing.
#[derive(Debug, Parser)]
#[command(
    name = "flickr_geo_harvest",
    about = "Harvests one day of geotagged Flickr photo metadata into a CSV file"
)]
pub struct Cli {
    /// Four digit year of the day to harvest
    pub year: Option<i32>,

    /// Month (1-12)
    pub month: Option<u32>,

    /// Day of month (1-31)
    pub day: Option<u32>,

    /// Key-value file holding `api_key`
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Root directory for the CSV output (defaults to the working directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output path convention
    #[arg(long, value_enum, default_value_t = OutputLayout::Dated)]
    pub layout: OutputLayout,

    /// Client-side taken-date filtering
    #[arg(long, value_enum, default_value_t = FilterMode::Strict)]
    pub filter: FilterMode,

    /// How the taken-date window is sent upstream
    #[arg(long, value_enum, default_value_t = WindowFormat::LocalTime)]
    pub window_format: WindowFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Returns `(year, month, day)` when all three positional arguments were given.
    pub fn date_parts(&self) -> Option<(i32, u32, u32)> {
        Some((self.year?, self.month?, self.day?))
    }
}

/// Retry schedule for a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: usize,
    /// Sleep between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_MAX_ATTEMPTS,
            delay: RETRY_DELAY,
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use flickr_geo_harvest::Config;
///
/// let config = Config {
///     year: 2020,
///     month: 1,
///     day: 15,
///     api_key: "0123456789abcdef".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Year of the day to harvest
    pub year: i32,

    /// Month of the day to harvest
    pub month: u32,

    /// Day of month to harvest
    pub day: u32,

    /// Flickr API key
    pub api_key: String,

    /// Root directory the CSV is written under
    pub output_dir: PathBuf,

    /// Output path convention
    pub layout: OutputLayout,

    /// Client-side taken-date filtering
    pub filter: FilterMode,

    /// Encoding of the window bounds sent upstream
    pub window_format: WindowFormat,

    /// API base URL (overridable for testing against a mock server)
    pub api_base: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Delay between page requests
    pub page_delay: Duration,

    /// Retry schedule for malformed responses
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
            day: 1,
            api_key: String::new(),
            output_dir: PathBuf::from("."),
            layout: OutputLayout::Dated,
            filter: FilterMode::Strict,
            window_format: WindowFormat::LocalTime,
            api_base: FLICKR_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_delay: PAGE_DELAY,
            retry: RetryPolicy::default(),
        }
    }
}
