//! Page fetching with bounded retry on malformed responses.
//!
//! Upstream occasionally answers with a truncated or otherwise unparseable
//! body. Such a page is re-requested a fixed number of times with a fixed
//! delay; every other failure (transport, HTTP status, API error) is returned
//! immediately.

use log::{debug, error, warn};
use tokio_retry::strategy::FixedInterval;
use url::Url;

use crate::config::{RetryPolicy, FLICKR_REST_PATH, HTTP_STATUS_OK};
use crate::error_handling::{ConfigError, FetchError};

use super::msgs::{PageResponse, SearchResponse};
use super::request::SearchRequest;

/// Maximum number of body characters kept in a status error.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// One raw HTTP reply.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Undecoded body
    pub body: Vec<u8>,
}

/// Sends a single GET and returns the raw reply.
#[allow(async_fn_in_trait)]
pub trait SearchTransport {
    /// Performs one GET against `url`.
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError>;
}

/// Produces one page of search results.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches page `page` (1-based) of `request`.
    async fn fetch_page(
        &self,
        page: u32,
        request: &SearchRequest,
    ) -> Result<PageResponse, FetchError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps a configured client.
    pub fn new(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

impl SearchTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}

/// Search endpoint client.
#[derive(Debug, Clone)]
pub struct FlickrClient<T> {
    transport: T,
    endpoint: Url,
    retry: RetryPolicy,
}

impl<T: SearchTransport> FlickrClient<T> {
    /// Creates a client for the REST endpoint under `api_base`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if `api_base` is not a valid URL.
    pub fn new(transport: T, api_base: &str, retry: RetryPolicy) -> Result<Self, ConfigError> {
        // `Url::join` replaces the last path segment unless the base ends in '/'
        let mut base = api_base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)?.join(FLICKR_REST_PATH)?;
        Ok(FlickrClient {
            transport,
            endpoint,
            retry,
        })
    }

    /// The REST endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for one page.
    pub fn page_url(&self, page: u32, request: &SearchRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs(page));
        url
    }

    async fn attempt(&self, url: &Url) -> Result<PageResponse, FetchError> {
        let raw = self.transport.get(url).await?;

        if raw.status != HTTP_STATUS_OK {
            let body: String = String::from_utf8_lossy(&raw.body)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(FetchError::Status {
                status: raw.status,
                body,
            });
        }

        match serde_json::from_slice::<SearchResponse>(&raw.body)? {
            SearchResponse::Ok { photos } => Ok(PageResponse::from_page(raw.status, photos)),
            SearchResponse::Fail { code, message } => Err(FetchError::Api { code, message }),
        }
    }
}

impl<T: SearchTransport> PageSource for FlickrClient<T> {
    async fn fetch_page(
        &self,
        page: u32,
        request: &SearchRequest,
    ) -> Result<PageResponse, FetchError> {
        let url = self.page_url(page, request);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut delays = FixedInterval::new(self.retry.delay).take(max_attempts - 1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                "Requesting page {} (attempt {}/{})",
                page, attempt, max_attempts
            );

            let err = match self.attempt(&url).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retriable() => e,
                Err(e) => return Err(e),
            };

            match delays.next() {
                Some(delay) => {
                    warn!(
                        "Malformed response for page {}, retry {} in {:?}: {}",
                        page, attempt, delay, err
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    error!(
                        "Malformed response for page {}, retrying FAILED after {} attempts: {}",
                        page, attempt, err
                    );
                    return Err(FetchError::Exhausted { attempts: attempt });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowFormat;
    use crate::window::{SearchDate, TimeWindow};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    const OK_BODY: &str = r#"{"photos":{"page":1,"pages":1,"perpage":250,"total":"1",
        "photo":[{"id":"1","datetaken":"2020-01-15 10:00:00"}]},"stat":"ok"}"#;

    /// Replays canned replies and records every URL it was asked for.
    struct ScriptedTransport {
        replies: Mutex<VecDeque<RawResponse>>,
        requested: Mutex<Vec<Url>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<(u16, &str)>) -> Self {
            ScriptedTransport {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|(status, body)| RawResponse {
                            status,
                            body: body.as_bytes().to_vec(),
                        })
                        .collect(),
                ),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requested.lock().unwrap().len()
        }
    }

    impl SearchTransport for ScriptedTransport {
        async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
            self.requested.lock().unwrap().push(url.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport called more often than scripted");
            Ok(reply)
        }
    }

    fn request() -> SearchRequest {
        let date = SearchDate::from_ymd(2020, 1, 15).unwrap();
        let window = TimeWindow::for_day_in(date, "America/Vancouver").unwrap();
        SearchRequest::new(date, window, "key123", WindowFormat::LocalTime)
    }

    fn client(replies: Vec<(u16, &str)>) -> FlickrClient<ScriptedTransport> {
        FlickrClient::new(
            ScriptedTransport::new(replies),
            "https://api.flickr.com/",
            RetryPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let c = client(vec![]);
        assert_eq!(c.endpoint().as_str(), "https://api.flickr.com/services/rest/");

        let c = FlickrClient::new(
            ScriptedTransport::new(vec![]),
            "http://127.0.0.1:8080",
            RetryPolicy::default(),
        )
        .unwrap();
        assert_eq!(c.endpoint().as_str(), "http://127.0.0.1:8080/services/rest/");
    }

    #[test]
    fn test_invalid_base_rejected() {
        let result = FlickrClient::new(
            ScriptedTransport::new(vec![]),
            "not a url",
            RetryPolicy::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidApiUrl(_))));
    }

    #[test]
    fn test_page_url_carries_query() {
        let c = client(vec![]);
        let url = c.page_url(7, &request());
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("page".to_string(), "7".to_string())));
        assert!(pairs.contains(&(
            "min_taken_date".to_string(),
            "2020-01-15 00:00:00".to_string()
        )));
        assert!(pairs.contains(&("api_key".to_string(), "key123".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt() {
        let c = client(vec![(200, OK_BODY)]);
        let page = c.fetch_page(1, &request()).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.pages, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.photos.len(), 1);
        assert_eq!(c.transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_malformed_bodies() {
        let c = client(vec![(200, "<html>"), (200, "{\"photos\":"), (200, OK_BODY)]);
        let started = tokio::time::Instant::now();
        let page = c.fetch_page(1, &request()).await.unwrap();
        assert_eq!(page.photos.len(), 1);
        assert_eq!(c.transport.calls(), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(20) && elapsed < Duration::from_secs(21));
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanently_malformed_exhausts_after_four_attempts() {
        let c = client(vec![(200, "garbage"); 4]);
        let started = tokio::time::Instant::now();
        let err = c.fetch_page(1, &request()).await.unwrap_err();
        assert!(matches!(err, FetchError::Exhausted { attempts: 4 }));
        assert_eq!(c.transport.calls(), 4);
        // three 10s delays between four attempts, none after the last
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(30) && elapsed < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_request_on_retry() {
        let c = client(vec![(200, "garbage"), (200, OK_BODY)]);
        c.fetch_page(2, &request()).await.unwrap();
        let requested = c.transport.requested.lock().unwrap();
        assert_eq!(requested.len(), 2);
        assert_eq!(requested[0], requested[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_status_not_retried() {
        let c = client(vec![(503, "Service Unavailable")]);
        let err = c.fetch_page(1, &request()).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "Service Unavailable");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(c.transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_api_failure_not_retried() {
        let c = client(vec![(
            200,
            r#"{"stat":"fail","code":100,"message":"Invalid API Key"}"#,
        )]);
        let err = c.fetch_page(1, &request()).await.unwrap_err();
        assert!(matches!(err, FetchError::Api { code: 100, .. }));
        assert_eq!(c.transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy() {
        let c = FlickrClient::new(
            ScriptedTransport::new(vec![(200, "garbage")]),
            "https://api.flickr.com/",
            RetryPolicy {
                max_attempts: 1,
                delay: Duration::from_secs(10),
            },
        )
        .unwrap();
        let err = c.fetch_page(1, &request()).await.unwrap_err();
        assert!(matches!(err, FetchError::Exhausted { attempts: 1 }));
    }
}
