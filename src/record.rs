//! Flattened photo records.
//!
//! Upstream photo objects are mostly flat, except for `description`, which is
//! a `{"_content": "..."}` wrapper. A `PhotoRecord` is built as a fresh value
//! from the raw object: every attribute in upstream order, the description
//! text moved into a trailing `description_content` column, and every value
//! rendered to text.

use chrono::NaiveDateTime;
use serde_json::Value;
use thiserror::Error;

use crate::flickr::RawPhoto;
use crate::window::parse_taken;

/// Column holding the photo identifier
pub const ID_KEY: &str = "id";
/// Upstream key of the nested description object
pub const DESCRIPTION_KEY: &str = "description";
/// Column the description text is promoted into
pub const DESCRIPTION_CONTENT_KEY: &str = "description_content";
/// Upstream key of the taken timestamp
pub const DATE_TAKEN_KEY: &str = "datetaken";

/// A raw photo that cannot become a record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// The photo has no `id` attribute.
    #[error("photo has no id")]
    MissingId,

    /// The `id` attribute is not an unsigned integer.
    #[error("photo id is not numeric: {0}")]
    InvalidId(String),
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    id: u64,
    taken: Option<NaiveDateTime>,
    columns: Vec<(String, String)>,
}

impl PhotoRecord {
    /// Flattens a raw upstream photo.
    ///
    /// # Errors
    ///
    /// Returns a `RecordError` if the photo has no integer `id`.
    pub fn flatten(raw: &RawPhoto) -> Result<Self, RecordError> {
        let id = parse_id(raw.get(ID_KEY).ok_or(RecordError::MissingId)?)?;
        let taken = raw
            .get(DATE_TAKEN_KEY)
            .and_then(Value::as_str)
            .and_then(parse_taken);

        let mut columns = Vec::with_capacity(raw.len() + 1);
        for (key, value) in raw {
            match key.as_str() {
                DESCRIPTION_KEY => continue,
                ID_KEY => columns.push((key.clone(), id.to_string())),
                _ => columns.push((key.clone(), render_value(value))),
            }
        }
        columns.push((
            DESCRIPTION_CONTENT_KEY.to_string(),
            description_text(raw.get(DESCRIPTION_KEY)),
        ));

        Ok(PhotoRecord { id, taken, columns })
    }

    /// Upstream photo identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Parsed taken timestamp, if upstream sent a parseable one.
    pub fn taken(&self) -> Option<&NaiveDateTime> {
        self.taken.as_ref()
    }

    /// Column names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    /// Value of one column.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All `(column, value)` pairs in order.
    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    /// Values projected onto `header`, empty where this record lacks a column.
    pub fn values_for<'a>(&'a self, header: &[String]) -> Vec<&'a str> {
        header.iter().map(|key| self.get(key).unwrap_or("")).collect()
    }

    /// Whether this record has exactly the given columns, in order.
    pub fn has_keys(&self, header: &[String]) -> bool {
        self.columns.len() == header.len() && self.keys().zip(header).all(|(a, b)| a == b.as_str())
    }
}

fn parse_id(value: &Value) -> Result<u64, RecordError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| RecordError::InvalidId(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| RecordError::InvalidId(s.clone())),
        other => Err(RecordError::InvalidId(other.to_string())),
    }
}

fn description_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(inner)) => inner.get("_content").map(render_value).unwrap_or_default(),
        Some(other) => render_value(other),
        None => String::new(),
    }
}

/// Renders a JSON value as a CSV cell.
///
/// Strings are written verbatim, null becomes an empty cell, and any nested
/// array or object is kept as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}
