//! Per-request customization hooks.
//!
//! A hook is registered under a filter key and receives the current value,
//! returning a possibly-overridden one. Hooks under the same key run in
//! registration order, each seeing the previous hook's output.

use std::collections::HashMap;
use std::fmt;

/// Overrides `posts_per_page` before a listing request.
pub const FILTER_POSTS_PER_PAGE: &str = "auto_copy_posts_post_per_page";
/// Overrides the post type collection name before a request.
pub const FILTER_POST_TYPE_PLURAL: &str = "auto_copy_posts_post_type_plural";

type Hook = Box<dyn Fn(String) -> String + Send + Sync>;

/// Named hooks that may override request values before each call.
#[derive(Default)]
pub struct Filters {
    hooks: HashMap<String, Vec<Hook>>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, key: &str, hook: F)
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.hooks
            .entry(key.to_string())
            .or_default()
            .push(Box::new(hook));
    }

    /// Builder form of [`Filters::add`].
    pub fn with<F>(mut self, key: &str, hook: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.add(key, hook);
        self
    }

    pub fn apply(&self, key: &str, value: String) -> String {
        match self.hooks.get(key) {
            Some(hooks) => hooks.iter().fold(value, |v, hook| hook(v)),
            None => value,
        }
    }
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.hooks.keys().collect();
        keys.sort();
        f.debug_struct("Filters").field("keys", &keys).finish()
    }
}
