//! The remote content fetcher.
//!
//! # Design
//! `RemoteFetcher` composes the site collaborators, the filter hooks, a
//! `WpClient` and a `Transport`. Every failure is logged through the
//! `ErrorLog` where it is detected and then returned as a value; nothing is
//! retried and nothing panics.
//!
//! The three operations keep distinct failure conventions:
//! - `request_posts` and `request_media_attachment` return `FetchError`.
//! - `request_post` returns `None` ("nothing"), and on a non-200 status it
//!   still decodes and returns the body after logging.

use std::iter::FusedIterator;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::client::{WpClient, TOTAL_PAGES_HEADER};
use crate::config::{
    Settings, DEFAULT_POSTS_PER_PAGE, DEFAULT_POST_TYPE_PLURAL, SETTING_POSTS_PER_PAGE,
    SETTING_POST_TYPE_PLURAL,
};
use crate::error::{FetchError, TransportError};
use crate::filters::{Filters, FILTER_POSTS_PER_PAGE, FILTER_POST_TYPE_PLURAL};
use crate::http::{HttpRequest, HttpResponse};
use crate::site::{
    DigitsOnly, ErrorLog, IdNormalizer, MemoryMetaStore, PostMetaStore, SettingsProvider,
    SiteUrlProvider, TracingLog, ORIGINAL_ID_META_KEY,
};
use crate::transport::{Transport, UreqTransport};
use crate::types::PageResult;

/// Reads remote posts, single posts and attachment URLs for the mirror.
///
/// Holds no mutable state; each operation is one request/response cycle.
pub struct RemoteFetcher {
    site: Arc<dyn SiteUrlProvider>,
    settings: Arc<dyn SettingsProvider>,
    filters: Filters,
    meta: Arc<dyn PostMetaStore>,
    normalizer: Arc<dyn IdNormalizer>,
    log: Arc<dyn ErrorLog>,
    transport: Arc<dyn Transport>,
}

impl RemoteFetcher {
    /// A fetcher reading site URL and settings from `settings`, talking
    /// through `UreqTransport` with the configured timeout.
    pub fn new(settings: Settings) -> Self {
        let transport = UreqTransport::new(Duration::from_secs(settings.timeout_secs));
        let settings = Arc::new(settings);
        Self {
            site: settings.clone(),
            settings,
            filters: Filters::new(),
            meta: Arc::new(MemoryMetaStore::new()),
            normalizer: Arc::new(DigitsOnly),
            log: Arc::new(TracingLog),
            transport: Arc::new(transport),
        }
    }

    pub fn with_site_url_provider(mut self, site: Arc<dyn SiteUrlProvider>) -> Self {
        self.site = site;
        self
    }

    pub fn with_settings_provider(mut self, settings: Arc<dyn SettingsProvider>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_meta_store(mut self, meta: Arc<dyn PostMetaStore>) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_id_normalizer(mut self, normalizer: Arc<dyn IdNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_error_log(mut self, log: Arc<dyn ErrorLog>) -> Self {
        self.log = log;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Fetch page `page` (from 1) of `post_type` (default: the configured
    /// plural type).
    pub fn request_posts(&self, page: u32, post_type: Option<&str>) -> Result<PageResult, FetchError> {
        let client = self.site_client().ok_or(FetchError::ConfigurationMissing)?;
        if page == 0 {
            self.log.log_error("Invalid page number 0, pages start at 1");
            return Err(FetchError::InvalidPage(page));
        }

        let post_type = match post_type {
            Some(post_type) => post_type.to_string(),
            None => self.setting(SETTING_POST_TYPE_PLURAL, DEFAULT_POST_TYPE_PLURAL),
        };
        let post_type = self.filters.apply(FILTER_POST_TYPE_PLURAL, post_type);
        let per_page = self.filters.apply(
            FILTER_POSTS_PER_PAGE,
            self.setting(SETTING_POSTS_PER_PAGE, &DEFAULT_POSTS_PER_PAGE.to_string()),
        );

        let request = client.build_list_posts(&post_type, &per_page, page);
        let response = self.send(&request).map_err(|err| {
            self.log.log_error(&err.0);
            FetchError::from(err)
        })?;

        client.parse_list_posts(response).map_err(|err| {
            let message = match &err {
                FetchError::RemoteStatus { status, .. } => format!("Error fetching posts: {status}"),
                FetchError::MissingPagingHeader => {
                    format!("Missing {TOTAL_PAGES_HEADER} header for {post_type} page {page}")
                }
                other => format!("Error reading {post_type} page {page}: {other}"),
            };
            self.log.log_error(&message);
            err
        })
    }

    /// Fetch the remote original of local post `post_id`.
    pub fn request_post(&self, post_id: u64) -> Option<Value> {
        let original_id = self
            .meta
            .get_post_meta(post_id, ORIGINAL_ID_META_KEY)
            .map(|raw| self.normalizer.normalize(&raw))
            .filter(|id| !id.is_empty());

        let client = self.site_client()?;

        let Some(original_id) = original_id else {
            self.log
                .log_error(&format!("No original id stored for post {post_id}"));
            return None;
        };

        let post_type = self.filters.apply(
            FILTER_POST_TYPE_PLURAL,
            self.setting(SETTING_POST_TYPE_PLURAL, DEFAULT_POST_TYPE_PLURAL),
        );

        let request = client.build_get_post(&post_type, &original_id);
        let response = match self.send(&request) {
            Ok(response) => response,
            Err(err) => {
                self.log.log_error(&err.0);
                return None;
            }
        };

        if response.status != 200 {
            self.log
                .log_error(&format!("Error fetching single post: {}", response.status));
        }

        match client.parse_get_post(response) {
            Ok(value) => Some(value),
            Err(err) => {
                self.log
                    .log_error(&format!("Error reading single post {post_id}: {err}"));
                None
            }
        }
    }

    /// Resolve attachment `id` to its URL; `post_id` only labels log lines.
    pub fn request_media_attachment(&self, id: u64, post_id: u64) -> Result<String, FetchError> {
        let client = self.site_client().ok_or(FetchError::ConfigurationMissing)?;

        let request = client.build_get_media(id);
        let response = self.send(&request).map_err(|err| {
            self.log
                .log_error(&format!("Error fetching attachment for post {post_id}"));
            self.log.log_error(&err.0);
            FetchError::from(err)
        })?;

        client
            .parse_get_media(response)
            .map(|media| media.guid_url)
            .map_err(|err| {
                let message = match &err {
                    FetchError::RemoteStatus { status, .. } => {
                        format!("Error fetching media attachment: {status}")
                    }
                    other => format!("Error reading attachment {id} for post {post_id}: {other}"),
                };
                self.log.log_error(&message);
                err
            })
    }

    /// Walk a collection page by page, starting at page 1.
    pub fn pages(&self, post_type: Option<&str>) -> PostPages<'_> {
        PostPages {
            fetcher: self,
            post_type: post_type.map(str::to_string),
            next: 1,
            page_count: None,
            done: false,
        }
    }

    fn site_client(&self) -> Option<WpClient> {
        match self.site.site_url().filter(|url| !url.trim().is_empty()) {
            Some(url) => Some(WpClient::new(&url)),
            None => {
                self.log.log_error("No site url set");
                None
            }
        }
    }

    fn setting(&self, key: &str, default: &str) -> String {
        self.settings
            .plugin_setting(key)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(path = %request.path, query = ?request.query, "requesting remote content");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "remote responded");
        Ok(response)
    }
}

/// Successive `request_posts` calls for pages 1, 2, ... until the last page
/// reported by the remote, or until the first error (which is yielded).
pub struct PostPages<'a> {
    fetcher: &'a RemoteFetcher,
    post_type: Option<String>,
    next: u32,
    page_count: Option<u32>,
    done: bool,
}

impl Iterator for PostPages<'_> {
    type Item = Result<PageResult, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if matches!(self.page_count, Some(count) if self.next > count) {
            self.done = true;
            return None;
        }

        let result = self.fetcher.request_posts(self.next, self.post_type.as_deref());
        match &result {
            Ok(page) => {
                self.page_count = Some(page.page_count);
                self.next += 1;
            }
            Err(_) => self.done = true,
        }
        Some(result)
    }
}

impl FusedIterator for PostPages<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::StaticSiteUrl;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const SITE: &str = "https://source.test/wp-json/wp/v2";

    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn replying(replies: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request")
        }
    }

    #[derive(Default)]
    struct RecordingLog(Mutex<Vec<String>>);

    impl RecordingLog {
        fn messages(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl ErrorLog for RecordingLog {
        fn log_error(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn ok(status: u16, headers: &[(&str, &str)], body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        })
    }

    fn refused() -> Result<HttpResponse, TransportError> {
        Err(TransportError("connection refused".to_string()))
    }

    fn fetcher(
        settings: Settings,
        transport: &Arc<ScriptedTransport>,
        log: &Arc<RecordingLog>,
    ) -> RemoteFetcher {
        RemoteFetcher::new(settings)
            .with_transport(transport.clone())
            .with_error_log(log.clone())
    }

    fn configured() -> Settings {
        Settings::default().with_site_url(SITE)
    }

    #[test]
    fn missing_site_url_fails_every_operation_without_requests() {
        let transport = ScriptedTransport::replying(Vec::new());
        let log = Arc::new(RecordingLog::default());
        let meta = Arc::new(MemoryMetaStore::new());
        meta.remember_original_id(1, "10");
        let f = fetcher(Settings::default(), &transport, &log).with_meta_store(meta);

        assert!(matches!(f.request_posts(1, None), Err(FetchError::ConfigurationMissing)));
        assert!(f.request_post(1).is_none());
        assert!(matches!(
            f.request_media_attachment(5, 1),
            Err(FetchError::ConfigurationMissing)
        ));
        assert!(transport.seen().is_empty());
        assert_eq!(log.messages(), vec!["No site url set"; 3]);
    }

    #[test]
    fn blank_site_url_from_provider_counts_as_missing() {
        let transport = ScriptedTransport::replying(Vec::new());
        let log = Arc::new(RecordingLog::default());
        let f = fetcher(configured(), &transport, &log)
            .with_site_url_provider(Arc::new(StaticSiteUrl(Some(String::new()))));
        assert!(matches!(f.request_posts(1, None), Err(FetchError::ConfigurationMissing)));
        assert!(transport.seen().is_empty());
    }

    #[test]
    fn request_posts_returns_page_result() {
        let transport = ScriptedTransport::replying(vec![ok(
            200,
            &[("X-WP-TotalPages", "4")],
            r#"[{"id":1},{"id":2},{"id":3}]"#,
        )]);
        let log = Arc::new(RecordingLog::default());
        let page = fetcher(configured(), &transport, &log)
            .request_posts(2, None)
            .unwrap();

        assert_eq!(page.post_count, 3);
        assert_eq!(page.page_count, 4);
        assert!(log.messages().is_empty());

        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, format!("{SITE}/posts"));
        assert_eq!(seen[0].query_param("_embed"), Some("1"));
        assert_eq!(seen[0].query_param("per_page"), Some("10"));
        assert_eq!(seen[0].query_param("page"), Some("2"));
    }

    #[test]
    fn request_posts_uses_explicit_post_type() {
        let transport = ScriptedTransport::replying(vec![ok(200, &[("X-WP-TotalPages", "1")], "[]")]);
        let log = Arc::new(RecordingLog::default());
        let page = fetcher(configured(), &transport, &log)
            .request_posts(1, Some("pages"))
            .unwrap();
        assert_eq!(page.post_count, 0);
        assert_eq!(transport.seen()[0].path, format!("{SITE}/pages"));
    }

    #[test]
    fn filters_override_type_and_page_size() {
        let transport = ScriptedTransport::replying(vec![ok(200, &[("X-WP-TotalPages", "1")], "[]")]);
        let log = Arc::new(RecordingLog::default());
        let filters = Filters::new()
            .with(FILTER_POSTS_PER_PAGE, |_| "50".to_string())
            .with(FILTER_POST_TYPE_PLURAL, |v| if v == "posts" { "articles".to_string() } else { v });
        fetcher(configured(), &transport, &log)
            .with_filters(filters)
            .request_posts(1, None)
            .unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].path, format!("{SITE}/articles"));
        assert_eq!(seen[0].query_param("per_page"), Some("50"));
    }

    #[test]
    fn request_posts_missing_header_fails() {
        let transport = ScriptedTransport::replying(vec![ok(200, &[], r#"[{"id":1}]"#)]);
        let log = Arc::new(RecordingLog::default());
        let err = fetcher(configured(), &transport, &log)
            .request_posts(1, None)
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingPagingHeader));
        assert_eq!(log.messages(), vec!["Missing X-WP-TotalPages header for posts page 1"]);
    }

    #[test]
    fn request_posts_non_200_logs_status() {
        let transport = ScriptedTransport::replying(vec![ok(503, &[], "down")]);
        let log = Arc::new(RecordingLog::default());
        let err = fetcher(configured(), &transport, &log)
            .request_posts(1, None)
            .unwrap_err();
        assert!(matches!(err, FetchError::RemoteStatus { status: 503, .. }));
        assert_eq!(log.messages(), vec!["Error fetching posts: 503"]);
    }

    #[test]
    fn request_posts_transport_failure_is_logged() {
        let transport = ScriptedTransport::replying(vec![refused()]);
        let log = Arc::new(RecordingLog::default());
        let err = fetcher(configured(), &transport, &log)
            .request_posts(1, None)
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(log.messages(), vec!["connection refused"]);
    }

    #[test]
    fn request_post_includes_normalized_original_id() {
        let transport = ScriptedTransport::replying(vec![ok(200, &[], r#"[{"id":42}]"#)]);
        let log = Arc::new(RecordingLog::default());
        let meta = Arc::new(MemoryMetaStore::new());
        meta.remember_original_id(7, "post-42");
        let value = fetcher(configured(), &transport, &log)
            .with_meta_store(meta)
            .request_post(7)
            .unwrap();

        assert_eq!(value, json!([{"id": 42}]));
        let seen = transport.seen();
        assert_eq!(seen[0].path, format!("{SITE}/posts"));
        assert_eq!(seen[0].query, vec![
            ("_embed".to_string(), "1".to_string()),
            ("include".to_string(), "42".to_string()),
        ]);
    }

    #[test]
    fn request_post_non_200_still_returns_body() {
        let transport = ScriptedTransport::replying(vec![ok(
            400,
            &[],
            r#"{"code":"rest_invalid_param","message":"Invalid parameter(s): include"}"#,
        )]);
        let log = Arc::new(RecordingLog::default());
        let meta = Arc::new(MemoryMetaStore::new());
        meta.remember_original_id(7, "42");
        let value = fetcher(configured(), &transport, &log)
            .with_meta_store(meta)
            .request_post(7)
            .unwrap();

        assert_eq!(value["code"], "rest_invalid_param");
        assert_eq!(log.messages(), vec!["Error fetching single post: 400"]);
    }

    #[test]
    fn request_post_without_original_id_sends_nothing() {
        let transport = ScriptedTransport::replying(Vec::new());
        let log = Arc::new(RecordingLog::default());
        assert!(fetcher(configured(), &transport, &log).request_post(7).is_none());
        assert!(transport.seen().is_empty());
        assert_eq!(log.messages(), vec!["No original id stored for post 7"]);
    }

    #[test]
    fn request_post_transport_failure_returns_none() {
        let transport = ScriptedTransport::replying(vec![refused()]);
        let log = Arc::new(RecordingLog::default());
        let meta = Arc::new(MemoryMetaStore::new());
        meta.remember_original_id(7, "42");
        let f = fetcher(configured(), &transport, &log).with_meta_store(meta);
        assert!(f.request_post(7).is_none());
        assert_eq!(log.messages(), vec!["connection refused"]);
    }

    #[test]
    fn request_media_attachment_returns_guid() {
        let transport = ScriptedTransport::replying(vec![ok(
            200,
            &[],
            r#"{"guid":{"rendered":"https://x/y.jpg"}}"#,
        )]);
        let log = Arc::new(RecordingLog::default());
        let url = fetcher(configured(), &transport, &log)
            .request_media_attachment(9, 1)
            .unwrap();
        assert_eq!(url, "https://x/y.jpg");
        assert_eq!(transport.seen()[0].path, format!("{SITE}/media/9"));
    }

    #[test]
    fn request_media_attachment_non_200() {
        let transport = ScriptedTransport::replying(vec![ok(404, &[], "{}")]);
        let log = Arc::new(RecordingLog::default());
        let err = fetcher(configured(), &transport, &log)
            .request_media_attachment(9, 1)
            .unwrap_err();
        assert!(matches!(err, FetchError::RemoteStatus { status: 404, .. }));
        assert_eq!(log.messages(), vec!["Error fetching media attachment: 404"]);
    }

    #[test]
    fn request_media_attachment_malformed_body() {
        let transport = ScriptedTransport::replying(vec![ok(200, &[], r#"{"id":9}"#)]);
        let log = Arc::new(RecordingLog::default());
        let err = fetcher(configured(), &transport, &log)
            .request_media_attachment(9, 1)
            .unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
        assert_eq!(log.messages().len(), 1);
    }

    #[test]
    fn request_media_attachment_transport_failure_names_post() {
        let transport = ScriptedTransport::replying(vec![refused()]);
        let log = Arc::new(RecordingLog::default());
        let err = fetcher(configured(), &transport, &log)
            .request_media_attachment(9, 31)
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(
            log.messages(),
            vec!["Error fetching attachment for post 31", "connection refused"]
        );
    }

    struct FixedSettings(Vec<(&'static str, &'static str)>);

    impl SettingsProvider for FixedSettings {
        fn plugin_setting(&self, key: &str) -> Option<String> {
            self.0
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    fn articles_meta() -> Arc<MemoryMetaStore> {
        let meta = Arc::new(MemoryMetaStore::new());
        meta.remember_original_id(7, "42");
        meta
    }

    fn assert_articles_requests(seen: &[HttpRequest]) {
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].path, format!("{SITE}/articles"));
        assert_eq!(seen[0].query_param("per_page"), Some("25"));
        assert_eq!(seen[1].path, format!("{SITE}/articles"));
        assert_eq!(seen[1].query_param("include"), Some("42"));
    }

    #[test]
    fn configured_settings_drive_type_and_page_size() {
        let transport = ScriptedTransport::replying(vec![
            ok(200, &[("X-WP-TotalPages", "1")], "[]"),
            ok(200, &[], r#"[{"id":42}]"#),
        ]);
        let log = Arc::new(RecordingLog::default());
        let settings = Settings {
            post_type_plural: "articles".to_string(),
            posts_per_page: 25,
            ..configured()
        };
        let f = fetcher(settings, &transport, &log).with_meta_store(articles_meta());

        f.request_posts(1, None).unwrap();
        assert!(f.request_post(7).is_some());
        assert_articles_requests(&transport.seen());
    }

    #[test]
    fn custom_settings_provider_drives_type_and_page_size() {
        let transport = ScriptedTransport::replying(vec![
            ok(200, &[("X-WP-TotalPages", "1")], "[]"),
            ok(200, &[], r#"[{"id":42}]"#),
        ]);
        let log = Arc::new(RecordingLog::default());
        let provider = FixedSettings(vec![
            (SETTING_POST_TYPE_PLURAL, "articles"),
            (SETTING_POSTS_PER_PAGE, "25"),
        ]);
        let f = fetcher(configured(), &transport, &log)
            .with_settings_provider(Arc::new(provider))
            .with_meta_store(articles_meta());

        f.request_posts(1, None).unwrap();
        assert!(f.request_post(7).is_some());
        assert_articles_requests(&transport.seen());
    }

    #[test]
    fn blank_or_missing_settings_fall_back_to_defaults() {
        let transport = ScriptedTransport::replying(vec![
            ok(200, &[("X-WP-TotalPages", "1")], "[]"),
            ok(200, &[("X-WP-TotalPages", "1")], "[]"),
        ]);
        let log = Arc::new(RecordingLog::default());
        let f = fetcher(configured(), &transport, &log)
            .with_settings_provider(Arc::new(FixedSettings(vec![
                (SETTING_POST_TYPE_PLURAL, "  "),
                (SETTING_POSTS_PER_PAGE, ""),
            ])));
        f.request_posts(1, None).unwrap();
        let f = f.with_settings_provider(Arc::new(FixedSettings(Vec::new())));
        f.request_posts(1, None).unwrap();

        for req in transport.seen() {
            assert_eq!(req.path, format!("{SITE}/posts"));
            assert_eq!(req.query_param("per_page"), Some("10"));
        }
    }

    #[test]
    fn request_posts_rejects_page_zero_without_requests() {
        let transport = ScriptedTransport::replying(Vec::new());
        let log = Arc::new(RecordingLog::default());
        let err = fetcher(configured(), &transport, &log)
            .request_posts(0, None)
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidPage(0)));
        assert!(transport.seen().is_empty());
        assert_eq!(log.messages(), vec!["Invalid page number 0, pages start at 1"]);
    }

    #[test]
    fn pages_walks_until_last_page() {
        let transport = ScriptedTransport::replying(vec![
            ok(200, &[("X-WP-TotalPages", "2")], r#"[{"id":1},{"id":2}]"#),
            ok(200, &[("X-WP-TotalPages", "2")], r#"[{"id":3}]"#),
        ]);
        let log = Arc::new(RecordingLog::default());
        let f = fetcher(configured(), &transport, &log);
        let counts: Vec<usize> = f
            .pages(None)
            .map(|page| page.unwrap().post_count)
            .collect();
        assert_eq!(counts, vec![2, 1]);
        assert_eq!(transport.seen().len(), 2);
    }

    #[test]
    fn pages_stops_after_first_error() {
        let transport = ScriptedTransport::replying(vec![
            ok(200, &[("X-WP-TotalPages", "5")], r#"[{"id":1}]"#),
            ok(500, &[], ""),
        ]);
        let log = Arc::new(RecordingLog::default());
        let f = fetcher(configured(), &transport, &log);
        let mut pages = f.pages(Some("posts"));
        assert!(pages.next().unwrap().is_ok());
        assert!(pages.next().unwrap().is_err());
        assert!(pages.next().is_none());
        assert_eq!(transport.seen().len(), 2);
    }
}
