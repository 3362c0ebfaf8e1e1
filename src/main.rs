//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `flickr_geo_harvest` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Credential loading
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use flickr_geo_harvest::config::load_api_key;
use flickr_geo_harvest::initialization::init_logger_with;
use flickr_geo_harvest::{run_harvest, Cli, Config};

const USAGE: &str = "usage: flickr_geo_harvest yyyy mm dd";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting FLICKR_API_KEY in .env without exporting it manually
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let Some((year, month, day)) = cli.date_parts() else {
        println!("{}", USAGE);
        return Ok(());
    };

    // Initialize logger based on CLI options
    let log_level = cli.log_level.clone();
    let log_format = cli.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match harvest(cli, year, month, day).await {
        Ok(report) => {
            println!(
                "Harvested {}: kept {} of {} photo{} ({} outside the day) from {} page{} in {:.1}s",
                report.date,
                report.retained,
                report.seen,
                if report.seen == 1 { "" } else { "s" },
                report.discarded,
                report.pages_fetched,
                if report.pages_fetched == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            println!("Results saved in {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("flickr_geo_harvest error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn harvest(
    cli: Cli,
    year: i32,
    month: u32,
    day: u32,
) -> Result<flickr_geo_harvest::HarvestReport> {
    let api_key = load_api_key(&cli.config).context("Failed to load API credentials")?;
    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve working directory")?,
    };

    let config = Config {
        year,
        month,
        day,
        api_key,
        output_dir,
        layout: cli.layout,
        filter: cli.filter,
        window_format: cli.window_format,
        timeout_seconds: cli.timeout_seconds,
        ..Default::default()
    };

    run_harvest(config).await
}
