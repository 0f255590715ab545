//! Collaborators the fetcher reads from the surrounding site.
//!
//! The host plugin owns settings storage, post metadata and its error log;
//! the fetcher only sees them through these traits. Default implementations
//! cover standalone use and tests.

use std::collections::HashMap;
use std::sync::RwLock;

/// Metadata key holding the remote id a local post was copied from.
pub const ORIGINAL_ID_META_KEY: &str = "auto_copy_posts_original_id";

/// Source of the remote REST root, e.g. `https://example.com/wp-json/wp/v2`.
pub trait SiteUrlProvider: Send + Sync {
    fn site_url(&self) -> Option<String>;
}

/// Named plugin settings (`auto_copy_posts_*`).
pub trait SettingsProvider: Send + Sync {
    fn plugin_setting(&self, key: &str) -> Option<String>;
}

/// Local post metadata, keyed by local post id and meta key.
pub trait PostMetaStore: Send + Sync {
    fn get_post_meta(&self, post_id: u64, key: &str) -> Option<String>;
}

/// Turns a stored original id into the value sent as `include=`.
pub trait IdNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

/// Fire-and-forget error sink.
pub trait ErrorLog: Send + Sync {
    fn log_error(&self, message: &str);
}

/// A fixed site URL; blank strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct StaticSiteUrl(pub Option<String>);

impl SiteUrlProvider for StaticSiteUrl {
    fn site_url(&self) -> Option<String> {
        self.0.clone().filter(|url| !url.trim().is_empty())
    }
}

/// Keeps only the ASCII digits of a stored id: `"post-42"` becomes `"42"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitsOnly;

impl IdNormalizer for DigitsOnly {
    fn normalize(&self, raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).collect()
    }
}

/// Emits errors as `tracing` events under the `autocopy` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ErrorLog for TracingLog {
    fn log_error(&self, message: &str) {
        tracing::error!(target: "autocopy", "{message}");
    }
}

/// In-memory post metadata.
#[derive(Debug, Default)]
pub struct MemoryMetaStore {
    entries: RwLock<HashMap<(u64, String), String>>,
}

impl MemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_post_meta(&self, post_id: u64, key: &str, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert((post_id, key.to_string()), value.into());
        }
    }

    /// Records the remote id `post_id` was copied from.
    pub fn remember_original_id(&self, post_id: u64, original_id: impl Into<String>) {
        self.set_post_meta(post_id, ORIGINAL_ID_META_KEY, original_id);
    }
}

impl PostMetaStore for MemoryMetaStore {
    fn get_post_meta(&self, post_id: u64, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()?
            .get(&(post_id, key.to_string()))
            .cloned()
    }
}
