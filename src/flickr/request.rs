//! Per-invocation search parameters.

use crate::config::{
    WindowFormat, CENTER_LATITUDE, CENTER_LONGITUDE, CONTENT_TYPE_PHOTOS, EXTRAS,
    FLICKR_SEARCH_METHOD, MEDIA_FILTER, SEARCH_RADIUS_KM, SORT_ORDER,
};
use crate::window::{SearchDate, TimeWindow};

/// A point on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Everything one harvest sends upstream, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The calendar day being harvested
    pub date: SearchDate,
    /// Local-day window the photos must be taken in
    pub window: TimeWindow,
    /// Center of the geo search
    pub center: GeoPoint,
    /// Search radius in kilometres
    pub radius_km: f64,
    /// Extra attributes requested per photo
    pub extras: Vec<String>,
    /// API credential
    pub api_key: String,
    /// Encoding of the window bounds
    pub window_format: WindowFormat,
}

impl SearchRequest {
    /// Builds a request for the fixed Vancouver search area.
    pub fn new(
        date: SearchDate,
        window: TimeWindow,
        api_key: impl Into<String>,
        window_format: WindowFormat,
    ) -> Self {
        SearchRequest {
            date,
            window,
            center: GeoPoint {
                latitude: CENTER_LATITUDE,
                longitude: CENTER_LONGITUDE,
            },
            radius_km: SEARCH_RADIUS_KM,
            extras: EXTRAS.iter().map(|e| e.to_string()).collect(),
            api_key: api_key.into(),
            window_format,
        }
    }

    /// Query parameters for one page of this search.
    pub fn query_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let (min_taken, max_taken) = match self.window_format {
            WindowFormat::LocalTime => self.window.local_strings(),
            WindowFormat::Epoch => {
                let (start, end) = self.window.epoch_seconds();
                (start.to_string(), end.to_string())
            }
        };

        vec![
            ("method", FLICKR_SEARCH_METHOD.to_string()),
            ("media", MEDIA_FILTER.to_string()),
            ("content_type", CONTENT_TYPE_PHOTOS.to_string()),
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("nojsoncallback", "1".to_string()),
            ("has_geo", "1".to_string()),
            ("extras", self.extras.join(",")),
            ("sort", SORT_ORDER.to_string()),
            ("page", page.to_string()),
            ("lat", format!("{:?}", self.center.latitude)),
            ("lon", format!("{:?}", self.center.longitude)),
            ("radius", format!("{:?}", self.radius_km)),
            ("min_taken_date", min_taken),
            ("max_taken_date", max_taken),
        ]
    }
}
