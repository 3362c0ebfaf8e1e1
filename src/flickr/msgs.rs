//! Wire types of the `flickr.photos.search` JSON response.

use serde::{Deserialize, Deserializer};

/// One photo object exactly as upstream sent it, in upstream key order.
pub type RawPhoto = serde_json::Map<String, serde_json::Value>;

/// Top-level search response, discriminated by the `stat` field.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "stat")]
pub enum SearchResponse {
    /// `{"stat": "ok", "photos": {...}}`
    #[serde(rename = "ok")]
    Ok { photos: PhotoPage },
    /// `{"stat": "fail", "code": 100, "message": "Invalid API Key"}`
    #[serde(rename = "fail")]
    Fail {
        #[serde(default)]
        code: i64,
        #[serde(default)]
        message: String,
    },
}

/// The `photos` object of a successful response.
///
/// Flickr has emitted the pagination counters both as JSON numbers and as
/// numeric strings, so both are accepted.
#[derive(Deserialize, Debug, Clone)]
pub struct PhotoPage {
    /// Current page number
    #[serde(deserialize_with = "number_or_string")]
    pub page: u32,
    /// Total page count
    #[serde(deserialize_with = "number_or_string")]
    pub pages: u32,
    /// Records per page
    #[serde(deserialize_with = "number_or_string")]
    pub perpage: u32,
    /// Total matching records
    #[serde(default, deserialize_with = "number_or_string")]
    pub total: u64,
    /// Photo records in upstream order
    #[serde(default)]
    pub photo: Vec<RawPhoto>,
}

/// One page of search results, as handed to the pagination loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    /// HTTP status of the reply
    pub status: u16,
    /// Page number upstream says this is
    pub page: u32,
    /// Total page count upstream reports on this page
    pub pages: u32,
    /// Records per page
    pub perpage: u32,
    /// Total matching records
    pub total: u64,
    /// Photo records in upstream order
    pub photos: Vec<RawPhoto>,
}

impl PageResponse {
    /// Builds a page from a decoded `photos` object.
    pub fn from_page(status: u16, page: PhotoPage) -> Self {
        PageResponse {
            status,
            page: page.page,
            pages: page.pages,
            perpage: page.perpage,
            total: page.total,
            photos: page.photo,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a count, got {:?}", s)))?,
    };
    T::try_from(value).map_err(|_| serde::de::Error::custom(format!("count out of range: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ok_response() {
        let body = r#"{"photos":{"page":1,"pages":3,"perpage":250,"total":612,
            "photo":[{"id":"49512345678","owner":"12345@N00","title":"Gastown"}]},
            "stat":"ok"}"#;
        match serde_json::from_str::<SearchResponse>(body).unwrap() {
            SearchResponse::Ok { photos } => {
                assert_eq!(photos.page, 1);
                assert_eq!(photos.pages, 3);
                assert_eq!(photos.perpage, 250);
                assert_eq!(photos.total, 612);
                assert_eq!(photos.photo.len(), 1);
                let keys: Vec<&String> = photos.photo[0].keys().collect();
                assert_eq!(keys, ["id", "owner", "title"]);
            }
            other => panic!("expected ok response, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_string_counters() {
        let body = r#"{"stat":"ok","photos":{"page":"2","pages":"4","perpage":"100","total":"350","photo":[]}}"#;
        match serde_json::from_str::<SearchResponse>(body).unwrap() {
            SearchResponse::Ok { photos } => {
                assert_eq!(photos.page, 2);
                assert_eq!(photos.pages, 4);
                assert_eq!(photos.total, 350);
            }
            other => panic!("expected ok response, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_fail_response() {
        let body = r#"{"stat":"fail","code":100,"message":"Invalid API Key (Key has invalid format)"}"#;
        match serde_json::from_str::<SearchResponse>(body).unwrap() {
            SearchResponse::Fail { code, message } => {
                assert_eq!(code, 100);
                assert!(message.starts_with("Invalid API Key"));
            }
            other => panic!("expected fail response, got {:?}", other),
        }
    }

    #[test]
    fn test_ok_without_photos_is_malformed() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"stat":"ok"}"#).is_err());
    }

    #[test]
    fn test_truncated_body_is_malformed() {
        let body = r#"{"photos":{"page":1,"pages":3,"perpage":250,"photo":[{"id":"4951"#;
        assert!(serde_json::from_str::<SearchResponse>(body).is_err());
    }

    #[test]
    fn test_non_numeric_counter_is_malformed() {
        let body = r#"{"stat":"ok","photos":{"page":"one","pages":1,"perpage":1,"photo":[]}}"#;
        assert!(serde_json::from_str::<SearchResponse>(body).is_err());
    }
}
