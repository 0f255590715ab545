use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Where the REST routes are mounted, as on a stock WordPress install.
pub const API_PREFIX: &str = "/wp-json/wp/v2";

const DEFAULT_PER_PAGE: usize = 10;
const MAX_PER_PAGE: usize = 100;

/// In-memory content of the imitated WordPress site, plus fault switches.
#[derive(Clone, Debug, Default)]
pub struct MockSite {
    posts: BTreeMap<String, Vec<Value>>,
    media: HashMap<u64, Value>,
    next_id: u64,
    forced_status: Option<u16>,
    omit_paging_headers: bool,
}

impl MockSite {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// 23 posts (3 pages at the default page size), 3 pages, and featured
    /// images on the first two posts.
    pub fn seeded() -> Self {
        Self::new()
            .with_posts("posts", 23)
            .with_posts("pages", 3)
            .with_featured_image(1, 100, "https://source.test/uploads/first.jpg")
            .with_featured_image(2, 101, "https://source.test/uploads/second.jpg")
    }

    /// Append `count` posts of `post_type`, numbered from the next free id.
    pub fn with_posts(mut self, post_type: &str, count: u64) -> Self {
        let entries = self.posts.entry(post_type.to_string()).or_default();
        for _ in 0..count {
            let id = self.next_id;
            self.next_id += 1;
            entries.push(post(id, post_type));
        }
        self
    }

    pub fn with_media(mut self, id: u64, url: &str) -> Self {
        self.media.insert(id, attachment(id, url));
        self
    }

    /// Add attachment `media_id` and set it as the featured image of `post_id`.
    pub fn with_featured_image(self, post_id: u64, media_id: u64, url: &str) -> Self {
        let mut site = self.with_media(media_id, url);
        for entry in site.posts.values_mut().flatten() {
            if entry["id"] == post_id {
                entry["featured_media"] = json!(media_id);
            }
        }
        site
    }

    /// Answer every request with `status` and a WordPress error body.
    pub fn failing_with(mut self, status: u16) -> Self {
        self.forced_status = Some(status);
        self
    }

    /// Drop `X-WP-Total` / `X-WP-TotalPages` from listing responses.
    pub fn without_paging_headers(mut self) -> Self {
        self.omit_paging_headers = true;
        self
    }

    fn embed(&self, mut entry: Value) -> Value {
        let media = entry["featured_media"]
            .as_u64()
            .and_then(|id| self.media.get(&id));
        if let Some(media) = media {
            entry["_embedded"] = json!({ "wp:featuredmedia": [media] });
        }
        entry
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "_embed")]
    pub embed: Option<String>,
    pub per_page: Option<usize>,
    pub page: Option<usize>,
    pub include: Option<String>,
}

pub type Site = Arc<MockSite>;

pub fn app() -> Router {
    app_with(MockSite::seeded())
}

pub fn app_with(site: MockSite) -> Router {
    let api = Router::new()
        .route("/media/{id}", get(get_media))
        .route("/{post_type}", get(list_posts))
        .with_state(Arc::new(site));
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, site: MockSite) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(site)).await
}

async fn list_posts(
    State(site): State<Site>,
    Path(post_type): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    debug!(%post_type, ?params, "list request");
    if let Some(status) = site.forced_status {
        return forced(status);
    }
    let Some(entries) = site.posts.get(&post_type) else {
        return wp_error(
            StatusCode::NOT_FOUND,
            "rest_no_route",
            "No route was found matching the URL and request method.",
        );
    };

    let include = match params.include.as_deref().map(parse_ids).transpose() {
        Ok(include) => include,
        Err(()) => {
            return wp_error(
                StatusCode::BAD_REQUEST,
                "rest_invalid_param",
                "Invalid parameter(s): include",
            )
        }
    };
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): per_page",
        );
    }
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_invalid_param",
            "Invalid parameter(s): page",
        );
    }

    let matching: Vec<&Value> = entries
        .iter()
        .filter(|entry| match &include {
            Some(ids) => entry["id"].as_u64().is_some_and(|id| ids.contains(&id)),
            None => true,
        })
        .collect();
    let total = matching.len();
    let total_pages = total.div_ceil(per_page);
    if total > 0 && page > total_pages {
        return wp_error(
            StatusCode::BAD_REQUEST,
            "rest_post_invalid_page_number",
            "The page number requested is larger than the number of pages available.",
        );
    }

    let body: Vec<Value> = matching
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(|entry| {
            if params.embed.is_some() {
                site.embed(entry.clone())
            } else {
                entry.clone()
            }
        })
        .collect();

    let mut headers = HeaderMap::new();
    if !site.omit_paging_headers {
        headers.insert("x-wp-total", HeaderValue::from(total));
        headers.insert("x-wp-totalpages", HeaderValue::from(total_pages));
    }
    (StatusCode::OK, headers, Json(body)).into_response()
}

async fn get_media(State(site): State<Site>, Path(id): Path<u64>) -> Response {
    debug!(id, "media request");
    if let Some(status) = site.forced_status {
        return forced(status);
    }
    match site.media.get(&id) {
        Some(media) => Json(media.clone()).into_response(),
        None => wp_error(StatusCode::NOT_FOUND, "rest_post_invalid_id", "Invalid post ID."),
    }
}

fn parse_ids(raw: &str) -> Result<BTreeSet<u64>, ()> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|_| ()))
        .collect()
}

fn forced(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    wp_error(status, "mock_forced_status", "Status forced by the mock site.")
}

fn wp_error(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "code": code,
        "message": message,
        "data": { "status": status.as_u16() },
    });
    (status, Json(body)).into_response()
}

fn post(id: u64, post_type: &str) -> Value {
    json!({
        "id": id,
        "slug": format!("{post_type}-{id}"),
        "status": "publish",
        "title": { "rendered": format!("{post_type} #{id}") },
        "content": { "rendered": format!("<p>Body of {post_type} {id}.</p>") },
        "featured_media": 0,
    })
}

fn attachment(id: u64, url: &str) -> Value {
    json!({
        "id": id,
        "media_type": "image",
        "source_url": url,
        "guid": { "rendered": url },
    })
}
