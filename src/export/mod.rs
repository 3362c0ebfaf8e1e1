//! Output of harvested records.
//!
//! This module decides where a day's CSV lives and writes it.

mod csv;

use std::path::{Path, PathBuf};

use crate::config::{OutputLayout, DATED_FILE_SUFFIX, FLAT_FILE_SUFFIX};
use crate::window::SearchDate;

pub use self::csv::{header_for, write_csv};

/// Output file for `date` under `root`.
///
/// - `Dated`: `<root>/<yyyy>/<mm>/<dd>/<yyyy>-<mm>-<dd>-vancouver_geo-flickr-metadata.csv`
/// - `Flat`: `<root>/<yyyy>-<mm>-<dd>-has_geo-flickr-metadata.csv`
pub fn output_path(root: &Path, date: SearchDate, layout: OutputLayout) -> PathBuf {
    let d = date.date();
    match layout {
        OutputLayout::Dated => root
            .join(d.format("%Y").to_string())
            .join(d.format("%m").to_string())
            .join(d.format("%d").to_string())
            .join(format!("{}-{}", date.ymd_string(), DATED_FILE_SUFFIX)),
        OutputLayout::Flat => root.join(format!("{}-{}", date.ymd_string(), FLAT_FILE_SUFFIX)),
    }
}
