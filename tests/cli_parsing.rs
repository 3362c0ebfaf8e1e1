//! Tests for CLI argument parsing.

use clap::Parser;
use flickr_geo_harvest::config::DEFAULT_CONFIG_FILE;
use flickr_geo_harvest::{Cli, FilterMode, LogFormat, LogLevel, OutputLayout, WindowFormat};
use std::path::PathBuf;

#[test]
fn test_cli_date_with_defaults() {
    let cli = Cli::try_parse_from(["flickr_geo_harvest", "2020", "1", "15"])
        .expect("Should parse a bare date");

    assert_eq!(cli.date_parts(), Some((2020, 1, 15)));
    assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    assert_eq!(cli.output_dir, None);
    assert_eq!(cli.layout, OutputLayout::Dated);
    assert_eq!(cli.filter, FilterMode::Strict);
    assert_eq!(cli.window_format, WindowFormat::LocalTime);
    assert_eq!(cli.timeout_seconds, 30);
    // LogLevel and LogFormat don't implement PartialEq, so we compare via conversion
    assert_eq!(
        log::LevelFilter::from(cli.log_level.clone()),
        log::LevelFilter::Info
    );
    assert!(matches!(cli.log_format, LogFormat::Plain));
}

#[test]
fn test_cli_missing_date_parts_is_not_an_error() {
    // A partial date parses; the binary turns it into the usage line
    let none = Cli::try_parse_from(["flickr_geo_harvest"]).expect("Should parse no args");
    assert_eq!(none.date_parts(), None);

    let partial =
        Cli::try_parse_from(["flickr_geo_harvest", "2020", "1"]).expect("Should parse two args");
    assert_eq!(partial.date_parts(), None);
}

#[test]
fn test_cli_all_options() {
    let cli = Cli::try_parse_from([
        "flickr_geo_harvest",
        "2019",
        "11",
        "30",
        "--config",
        "/etc/flickr.conf",
        "--output-dir",
        "/data/flickr",
        "--layout",
        "flat",
        "--filter",
        "trust-upstream",
        "--window-format",
        "epoch",
        "--timeout-seconds",
        "5",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("Should parse every option");

    assert_eq!(cli.date_parts(), Some((2019, 11, 30)));
    assert_eq!(cli.config, PathBuf::from("/etc/flickr.conf"));
    assert_eq!(cli.output_dir, Some(PathBuf::from("/data/flickr")));
    assert_eq!(cli.layout, OutputLayout::Flat);
    assert_eq!(cli.filter, FilterMode::TrustUpstream);
    assert_eq!(cli.window_format, WindowFormat::Epoch);
    assert_eq!(cli.timeout_seconds, 5);
    assert_eq!(
        log::LevelFilter::from(cli.log_level.clone()),
        log::LevelFilter::from(LogLevel::Debug)
    );
    assert!(matches!(cli.log_format, LogFormat::Json));
}

#[test]
fn test_cli_rejects_non_numeric_date() {
    let result = Cli::try_parse_from(["flickr_geo_harvest", "2020", "jan", "15"]);
    assert!(result.is_err(), "month must be numeric");
}

#[test]
fn test_cli_rejects_unknown_layout() {
    let result = Cli::try_parse_from(["flickr_geo_harvest", "2020", "1", "15", "--layout", "nested"]);
    assert!(result.is_err(), "unknown layout should be rejected");
}
