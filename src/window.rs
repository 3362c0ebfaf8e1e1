//! Calendar day resolution.
//!
//! A harvest covers one calendar day in a named timezone. The day is turned
//! into a closed window `[00:00, 23:59]` of local wall-clock time, resolved
//! through the IANA zone database so that the absolute bounds shift correctly
//! on daylight-saving transition days.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error_handling::ConfigError;

/// Format of the local timestamps sent as `min_taken_date`/`max_taken_date`
/// and emitted by upstream as `datetaken`.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A validated calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchDate(NaiveDate);

impl SearchDate {
    /// Validates a `(year, month, day)` triple.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ConfigError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(SearchDate)
            .ok_or(ConfigError::InvalidDate { year, month, day })
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `yyyy-mm-dd`, zero padded.
    pub fn ymd_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for SearchDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.ymd_string())
    }
}

/// The closed interval covering one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl TimeWindow {
    /// Resolves `date` in the zone named `zone_name` (e.g. `America/Vancouver`).
    pub fn for_day_in(date: SearchDate, zone_name: &str) -> Result<Self, ConfigError> {
        let tz: Tz = zone_name
            .parse()
            .map_err(|_| ConfigError::UnknownTimezone(zone_name.to_string()))?;
        Self::for_day(date, tz)
    }

    /// Resolves `date` in `tz`: 00:00 local through 23:59 local.
    pub fn for_day(date: SearchDate, tz: Tz) -> Result<Self, ConfigError> {
        let start = resolve_local(tz, date.date().and_time(NaiveTime::MIN), true)?;
        let end_time = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
        let end = resolve_local(tz, date.date().and_time(end_time), false)?;
        Ok(TimeWindow { start, end })
    }

    /// First instant of the window.
    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// Last instant of the window (23:59 local).
    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    /// Whether a local wall-clock time (as upstream reports `datetaken`)
    /// falls inside the window, bounds included.
    pub fn contains_local(&self, taken: &NaiveDateTime) -> bool {
        *taken >= self.start.naive_local() && *taken <= self.end.naive_local()
    }

    /// Window bounds as local `YYYY-MM-DD HH:MM:SS` strings.
    pub fn local_strings(&self) -> (String, String) {
        (
            self.start.format(LOCAL_TIME_FORMAT).to_string(),
            self.end.format(LOCAL_TIME_FORMAT).to_string(),
        )
    }

    /// Window bounds as Unix epoch seconds.
    pub fn epoch_seconds(&self) -> (i64, i64) {
        (self.start.timestamp(), self.end.timestamp())
    }
}

/// Parses an upstream `datetaken` value (`2020-01-15 10:21:07`).
pub fn parse_taken(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), LOCAL_TIME_FORMAT).ok()
}

// Ambiguous local times (DST fall-back) resolve to the earliest instant for a
// window start and the latest for a window end, so the window never shrinks.
fn resolve_local(tz: Tz, local: NaiveDateTime, earliest: bool) -> Result<DateTime<Tz>, ConfigError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(first, second) => Ok(if earliest { first } else { second }),
        LocalResult::None => Err(ConfigError::NonexistentLocalTime {
            local: local.format(LOCAL_TIME_FORMAT).to_string(),
            zone: tz.name().to_string(),
        }),
    }
}
