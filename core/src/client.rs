//! Stateless HTTP request builder and response parser for the WordPress REST
//! routes the mirror reads.
//!
//! # Design
//! `WpClient` holds only a `base_url`. Each wire call is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; `RemoteFetcher` runs the round-trip in
//! between through its `Transport`.

use serde_json::Value;

use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{MediaAttachment, PageResult};

/// Response header carrying the number of pages in a collection.
pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// Synchronous, stateless client for the WordPress REST read routes.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Every request asks for JSON.
#[derive(Debug, Clone)]
pub struct WpClient {
    base_url: String,
}

impl WpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/{post_type}?_embed=1&per_page={n}&page={p}`
    pub fn build_list_posts(&self, post_type: &str, per_page: &str, page: u32) -> HttpRequest {
        json_get(self.collection_path(post_type))
            .with_query("_embed", 1)
            .with_query("per_page", per_page)
            .with_query("page", page)
    }

    /// `GET {base}/{post_type}?_embed=1&include={id}`
    pub fn build_get_post(&self, post_type: &str, include: &str) -> HttpRequest {
        json_get(self.collection_path(post_type))
            .with_query("_embed", 1)
            .with_query("include", include)
    }

    /// `GET {base}/media/{id}?_embed=1`
    pub fn build_get_media(&self, id: u64) -> HttpRequest {
        json_get(format!("{}/media/{id}", self.base_url)).with_query("_embed", 1)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<PageResult, FetchError> {
        check_status(&response, 200)?;
        let page_count = page_count(&response)?;
        let posts = match decode(&response.body)? {
            Value::Array(posts) => posts,
            other => {
                return Err(FetchError::MalformedPayload(format!(
                    "expected a JSON array of posts, got {}",
                    kind_of(&other)
                )))
            }
        };
        Ok(PageResult::new(posts, page_count))
    }

    /// Decodes the body whatever the status; the caller decides what a
    /// non-200 answer means.
    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Value, FetchError> {
        decode(&response.body)
    }

    pub fn parse_get_media(&self, response: HttpResponse) -> Result<MediaAttachment, FetchError> {
        check_status(&response, 200)?;
        let value = decode(&response.body)?;
        MediaAttachment::from_value(&value)
            .ok_or_else(|| FetchError::MalformedPayload("attachment has no guid.rendered".to_string()))
    }

    fn collection_path(&self, post_type: &str) -> String {
        format!("{}/{}", self.base_url, post_type.trim_matches('/'))
    }
}

fn json_get(path: String) -> HttpRequest {
    HttpRequest::get(path).with_header("accept", "application/json")
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), FetchError> {
    if response.status == expected {
        return Ok(());
    }
    Err(FetchError::RemoteStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Missing, blank and zero page counts all invalidate the listing.
fn page_count(response: &HttpResponse) -> Result<u32, FetchError> {
    let raw = response
        .header(TOTAL_PAGES_HEADER)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(FetchError::MissingPagingHeader)?;
    match raw.parse::<u32>() {
        Ok(0) => Err(FetchError::MissingPagingHeader),
        Ok(count) => Ok(count),
        Err(_) => Err(FetchError::MalformedPayload(format!(
            "{TOTAL_PAGES_HEADER} is not a page count: {raw:?}"
        ))),
    }
}

fn decode(body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::MalformedPayload(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
