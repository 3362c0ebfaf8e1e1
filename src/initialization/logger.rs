//! Logger initialization.
//!
//! Log lines go to stderr so that stdout only carries the final run summary.

use std::io::Write;

use colored::*;
use env_logger::fmt::Formatter;
use log::{LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (colored, timestamped) and JSON lines for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter overrides it for this crate.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging
/// RUST_LOG=debug flickr_geo_harvest 2020 1 15
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug flickr_geo_harvest 2020 1 15 --log-level info
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("flickr_geo_harvest", level);
    builder.target(env_logger::Target::Stderr);

    match format {
        LogFormat::Json => {
            builder.format(format_json);
        }
        LogFormat::Plain => {
            builder.format(format_plain);
        }
    }

    // try_init() so a second initialization (tests) reports instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn format_plain(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let level = record.level();
    let colored_level = match level {
        log::Level::Error => level.to_string().red(),
        log::Level::Warn => level.to_string().yellow(),
        log::Level::Info => level.to_string().green(),
        log::Level::Debug => level.to_string().blue(),
        log::Level::Trace => level.to_string().purple(),
    };

    writeln!(
        buf,
        "{} {:>5} {} {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        colored_level,
        record.target().cyan(),
        record.args()
    )
}

fn format_json(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    writeln!(buf, "{}", json_line(record))
}

fn json_line(record: &Record) -> String {
    serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
    .to_string()
}
