//! flickr_geo_harvest library: one day of geotagged Flickr photo metadata
//!
//! This library searches the Flickr API for public photos taken within 15 km of
//! downtown Vancouver during one local calendar day, walks every result page,
//! discards records whose taken timestamp falls outside that day, and writes
//! the remaining records to a single flat CSV file.
//!
//! # Example
//!
//! ```no_run
//! use flickr_geo_harvest::{run_harvest, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     year: 2020,
//!     month: 1,
//!     day: 15,
//!     api_key: "0123456789abcdef".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = run_harvest(config).await?;
//! println!("Kept {} photos across {} pages in {}",
//!          report.retained, report.pages_fetched, report.output_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod collect;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod flickr;
pub mod initialization;
pub mod record;
pub mod window;

// Re-export public API
pub use collect::{collect, CollectOptions, ResultSet};
pub use config::{Cli, Config, FilterMode, LogFormat, LogLevel, OutputLayout, WindowFormat};
pub use error_handling::{ConfigError, FetchError, HarvestError, OutputError};
pub use run::{harvest_with, run_harvest, HarvestReport};

// Internal run module (ties request building, collection and export together)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{debug, info};

    use crate::collect::{collect, CollectOptions};
    use crate::config::{Config, SEARCH_TIMEZONE};
    use crate::error_handling::{ConfigError, HarvestError};
    use crate::export::{output_path, write_csv};
    use crate::flickr::{FlickrClient, PageSource, ReqwestTransport, SearchRequest};
    use crate::initialization::init_client;
    use crate::window::{SearchDate, TimeWindow};

    /// Results of a harvest run.
    ///
    /// Contains summary statistics and the location of the written CSV.
    #[derive(Debug, Clone)]
    pub struct HarvestReport {
        /// Harvested day as `YYYY-MM-DD`
        pub date: String,
        /// Number of result pages fetched
        pub pages_fetched: u32,
        /// Photos upstream returned across all pages
        pub seen: usize,
        /// Photos written to the CSV
        pub retained: usize,
        /// Photos dropped by the taken-date filter
        pub discarded: usize,
        /// Path of the CSV file
        pub output_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a harvest with the provided configuration.
    ///
    /// This is the main entry point for the library. It builds the search for
    /// the configured day, fetches every result page from the Flickr API and
    /// writes the retained photos to a CSV file under `config.output_dir`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The date or API key is invalid (`ConfigError`, before any request)
    /// - The HTTP client cannot be initialized
    /// - Any page cannot be fetched or a photo has no usable id (`HarvestError`)
    /// - The CSV file cannot be written
    ///
    /// No output file is written when the harvest fails.
    pub async fn run_harvest(config: Config) -> Result<HarvestReport> {
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let flickr = FlickrClient::new(ReqwestTransport::new(client), &config.api_base, config.retry)
            .context("Failed to build Flickr API client")?;
        debug!("Flickr endpoint: {}", flickr.endpoint());

        harvest_with(&config, &flickr).await
    }

    /// Runs a harvest against an arbitrary page source.
    ///
    /// Same as [`run_harvest`] except that pages come from `source`, which lets
    /// callers supply their own transport or a recorded set of pages.
    ///
    /// # Errors
    ///
    /// See [`run_harvest`].
    pub async fn harvest_with<S: PageSource>(config: &Config, source: &S) -> Result<HarvestReport> {
        let start_time = Instant::now();
        let request = build_request(config)?;
        let date = request.date;

        let (begin, end) = request.window.local_strings();
        info!("BEGIN: {}", begin);
        info!("END: {}", end);
        let (begin_epoch, end_epoch) = request.window.epoch_seconds();
        debug!("BEGIN epoch: {} END epoch: {}", begin_epoch, end_epoch);

        let options = CollectOptions {
            filter: config.filter,
            page_delay: config.page_delay,
        };
        let result = collect(source, &request, &options).await?;

        let path = output_path(&config.output_dir, date, config.layout);
        let written = write_csv(&path, result.records()).map_err(HarvestError::from)?;
        info!("Wrote {} photos to {}", written, path.display());

        Ok(HarvestReport {
            date: date.ymd_string(),
            pages_fetched: result.pages_fetched,
            seen: result.seen,
            retained: written,
            discarded: result.discarded,
            output_path: path,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    fn build_request(config: &Config) -> Result<SearchRequest, ConfigError> {
        let date = SearchDate::from_ymd(config.year, config.month, config.day)?;
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        let window = TimeWindow::for_day_in(date, SEARCH_TIMEZONE)?;
        Ok(SearchRequest::new(
            date,
            window,
            config.api_key.trim(),
            config.window_format,
        ))
    }

}
