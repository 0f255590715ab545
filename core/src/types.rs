//! Result records handed back to the caller.
//!
//! Posts stay opaque `serde_json::Value`s: the mirroring side picks the
//! fields it needs from the embedded resource.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a remote post collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResult {
    pub posts: Vec<Value>,
    pub post_count: usize,
    pub page_count: u32,
}

impl PageResult {
    pub fn new(posts: Vec<Value>, page_count: u32) -> Self {
        Self {
            post_count: posts.len(),
            posts,
            page_count,
        }
    }

    /// Whether the remote reports pages after `page`.
    pub fn has_more(&self, page: u32) -> bool {
        page < self.page_count
    }
}

/// The part of a media attachment the mirror keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub guid_url: String,
}

impl MediaAttachment {
    /// Extract `guid.rendered`, checking presence instead of indexing blindly.
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .get("guid")?
            .get("rendered")?
            .as_str()
            .map(|url| Self {
                guid_url: url.to_string(),
            })
    }
}
