//! Configuration constants.
//!
//! This module defines the fixed upstream parameters of the Flickr search
//! (endpoint, search area, extras) together with the pacing and retry timing
//! used by the harvester.

use std::time::Duration;

// Upstream endpoint
/// Base URL of the Flickr API
pub const FLICKR_API_BASE: &str = "https://api.flickr.com/";
/// Relative path of the REST endpoint, joined onto `FLICKR_API_BASE`
pub const FLICKR_REST_PATH: &str = "services/rest/";
/// API method selector for photo search
pub const FLICKR_SEARCH_METHOD: &str = "flickr.photos.search";

// Search filters
/// Media filter: still photos only, no videos
pub const MEDIA_FILTER: &str = "photos";
/// Content-type filter: photos only (excludes screenshots and illustrations)
pub const CONTENT_TYPE_PHOTOS: &str = "1";
/// Result ordering, oldest taken-date first
pub const SORT_ORDER: &str = "date-taken-asc";

// Search area
/// Latitude of the search center (downtown Vancouver)
pub const CENTER_LATITUDE: f64 = 49.283166;
/// Longitude of the search center (downtown Vancouver)
pub const CENTER_LONGITUDE: f64 = -123.109331;
/// Search radius around the center, in kilometres
pub const SEARCH_RADIUS_KM: f64 = 15.0;
/// IANA zone the requested calendar day is resolved in
pub const SEARCH_TIMEZONE: &str = "America/Vancouver";

/// Extra per-photo attributes requested from upstream.
///
/// Every one of these lands in the CSV as its own column (the `description`
/// extra is flattened into `description_content`).
pub const EXTRAS: &[&str] = &[
    "description",
    "license",
    "date_upload",
    "date_taken",
    "owner_name",
    "icon_server",
    "original_format",
    "last_update",
    "geo",
    "tags",
    "machine_tags",
    "o_dims",
    "views",
    "media",
    "path_alias",
    "url_sq",
    "url_t",
    "url_s",
    "url_m",
    "url_z",
    "url_l",
    "url_o",
    "url_c",
    "url_q",
    "url_n",
    "url_k",
    "url_h",
    "url_b",
];

// Pacing and retry strategy
/// Courtesy delay between consecutive page requests
pub const PAGE_DELAY: Duration = Duration::from_secs(2);
/// Delay before re-sending a request whose body could not be parsed
pub const RETRY_DELAY: Duration = Duration::from_secs(10);
/// Maximum number of attempts per page (including the initial attempt)
/// Set to 4 = initial attempt + 3 retries
pub const RETRY_MAX_ATTEMPTS: usize = 4;

// HTTP client
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("flickr_geo_harvest/", env!("CARGO_PKG_VERSION"));

// Credentials
/// Default key-value file holding the API credential
pub const DEFAULT_CONFIG_FILE: &str = "flickr.conf";
/// Key of the API credential inside the config file
pub const API_KEY_NAME: &str = "api_key";
/// Environment variable that overrides the config file credential
pub const API_KEY_ENV: &str = "FLICKR_API_KEY";

// Output naming
/// Filename suffix for the dated directory layout
pub const DATED_FILE_SUFFIX: &str = "vancouver_geo-flickr-metadata.csv";
/// Filename suffix for the flat layout
pub const FLAT_FILE_SUFFIX: &str = "has_geo-flickr-metadata.csv";

// HTTP status codes
/// The only status the search endpoint answers successfully with
pub const HTTP_STATUS_OK: u16 = 200;
