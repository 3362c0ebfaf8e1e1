//! Flickr search API client.
//!
//! This module provides:
//! - The fixed search request and its query parameters
//! - Wire types of the JSON search response
//! - A page fetcher that retries malformed responses

mod client;
mod msgs;
mod request;

pub use client::{FlickrClient, PageSource, RawResponse, ReqwestTransport, SearchTransport};
pub use msgs::{PageResponse, PhotoPage, RawPhoto, SearchResponse};
pub use request::{GeoPoint, SearchRequest};
