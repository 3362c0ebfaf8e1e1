//! Pagination and taken-date filtering.
//!
//! Walks the search result pages in order, flattens every photo and keeps the
//! ones taken inside the requested local day. The page count reported by the
//! first page is the only one honored: later pages are trusted for their own
//! page number and nothing else.

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{FilterMode, PAGE_DELAY};
use crate::error_handling::HarvestError;
use crate::flickr::{PageSource, SearchRequest};
use crate::record::PhotoRecord;

/// Loop behavior that is not part of the upstream request.
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    /// Client-side taken-date filtering
    pub filter: FilterMode,
    /// Sleep between page requests
    pub page_delay: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            filter: FilterMode::Strict,
            page_delay: PAGE_DELAY,
        }
    }
}

/// All retained records of one harvest, in upstream order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<PhotoRecord>,
    /// Pages requested and processed
    pub pages_fetched: u32,
    /// Page count captured from the first page
    pub total_pages: u32,
    /// Records per page captured from the first page
    pub per_page: u32,
    /// Photos upstream returned across all pages
    pub seen: usize,
    /// Photos dropped by the taken-date filter
    pub discarded: usize,
}

impl ResultSet {
    /// Retained records.
    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the set, returning the records.
    pub fn into_records(self) -> Vec<PhotoRecord> {
        self.records
    }
}

/// Fetches every page of `request` and returns the retained records.
///
/// Exactly as many pages are requested as the first page reports, with
/// `options.page_delay` between consecutive requests.
///
/// # Errors
///
/// Any page that cannot be fetched aborts the collection with
/// `HarvestError::Upstream`; a photo without a usable `id` aborts it with
/// `HarvestError::MalformedRecord`. No partial result is returned.
pub async fn collect<S: PageSource>(
    source: &S,
    request: &SearchRequest,
    options: &CollectOptions,
) -> Result<ResultSet, HarvestError> {
    let mut result = ResultSet::default();
    let mut page: u32 = 1;

    loop {
        debug!("page:{}", page);
        let response = source
            .fetch_page(page, request)
            .await
            .map_err(|source| HarvestError::Upstream { page, source })?;

        if page == 1 {
            result.per_page = response.perpage;
            result.total_pages = response.pages;
            info!(
                "{} photos across {} page(s) of {}",
                response.total, response.pages, response.perpage
            );
        } else if response.pages != result.total_pages {
            warn!(
                "Page {} reports {} pages, keeping {} from the first page",
                page, response.pages, result.total_pages
            );
        }
        debug!("photos_per_page: {}", result.per_page);
        debug!(
            "STATUS from flickr API:{} retrieved page:{} of:{}",
            response.status, response.page, response.pages
        );

        for raw in &response.photos {
            result.seen += 1;
            let record =
                PhotoRecord::flatten(raw).map_err(|e| HarvestError::MalformedRecord {
                    page,
                    reason: e.to_string(),
                })?;
            debug!("woeid: {}", record.get("woeid").unwrap_or(""));

            if keep(&record, request, options.filter) {
                result.records.push(record);
            } else {
                result.discarded += 1;
            }
        }
        result.pages_fetched += 1;

        // `>=` also ends a search whose first page reports zero pages
        if page >= result.total_pages {
            break;
        }

        tokio::time::sleep(options.page_delay).await;
        page += 1;
    }

    info!(
        "number of photos: {} ({} discarded of {} returned)",
        result.len(),
        result.discarded,
        result.seen
    );
    if let (Some(first), Some(last)) = (result.records.first(), result.records.last()) {
        debug!("FIRST photo: {:?}", first.columns());
        debug!("LAST photo: {:?}", last.columns());
    }

    Ok(result)
}

fn keep(record: &PhotoRecord, request: &SearchRequest, filter: FilterMode) -> bool {
    match filter {
        FilterMode::TrustUpstream => true,
        FilterMode::Strict => match record.taken() {
            Some(taken) if request.window.contains_local(taken) => {
                debug!("date_taken:{}", taken);
                true
            }
            Some(taken) => {
                debug!("date_taken: {} OUT OF BOUNDS discarding photo {}", taken, record.id());
                false
            }
            None => {
                warn!(
                    "Photo {} has no parseable datetaken ({:?}), discarding",
                    record.id(),
                    record.get("datetaken")
                );
                false
            }
        },
    }
}
