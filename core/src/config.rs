//! Plugin settings.
//!
//! `Settings` is the typed form of the `auto_copy_posts_*` options. It loads
//! from a TOML file, takes `AUTOCOPY_*` environment overrides, and serves the
//! values to the fetcher as both `SiteUrlProvider` and `SettingsProvider`.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::site::{SettingsProvider, SiteUrlProvider};

pub const SETTING_SITE_URL: &str = "auto_copy_posts_site_url";
pub const SETTING_POST_TYPE_PLURAL: &str = "auto_copy_posts_post_type_plural";
pub const SETTING_POSTS_PER_PAGE: &str = "auto_copy_posts_post_per_page";

pub const DEFAULT_POST_TYPE_PLURAL: &str = "posts";
pub const DEFAULT_POSTS_PER_PAGE: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_CONFIG_PATH: &str = "autocopy.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default = "default_post_type_plural")]
    pub post_type_plural: String,
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_post_type_plural() -> String { DEFAULT_POST_TYPE_PLURAL.to_string() }
fn default_posts_per_page() -> u32 { DEFAULT_POSTS_PER_PAGE }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_url: None,
            post_type_plural: default_post_type_plural(),
            posts_per_page: default_posts_per_page(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = Some(url.into());
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The file named by `AUTOCOPY_CONFIG`, else `autocopy.toml` when it
    /// exists, else defaults; then environment overrides.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// [`Settings::load_default`] reading the environment through `lookup`.
    /// A missing `AUTOCOPY_CONFIG` file is an error; only the implicit
    /// `autocopy.toml` may be absent.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = match lookup("AUTOCOPY_CONFIG") {
            Some(path) => Self::load_from_file(&path)?,
            None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };
        settings.apply_env(lookup)
    }

    /// Overlay `AUTOCOPY_*` values read through `lookup`.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AUTOCOPY_SITE_URL") {
            self.site_url = Some(url);
        }
        if let Some(post_type) = lookup("AUTOCOPY_POST_TYPE_PLURAL") {
            self.post_type_plural = post_type;
        }
        if let Some(value) = lookup("AUTOCOPY_POSTS_PER_PAGE") {
            self.posts_per_page = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "AUTOCOPY_POSTS_PER_PAGE",
                value,
            })?;
        }
        if let Some(value) = lookup("AUTOCOPY_TIMEOUT_SECS") {
            self.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "AUTOCOPY_TIMEOUT_SECS",
                value,
            })?;
        }
        Ok(self)
    }
}

impl SiteUrlProvider for Settings {
    fn site_url(&self) -> Option<String> {
        self.site_url.clone().filter(|url| !url.trim().is_empty())
    }
}

impl SettingsProvider for Settings {
    fn plugin_setting(&self, key: &str) -> Option<String> {
        match key {
            SETTING_SITE_URL => self.site_url(),
            SETTING_POST_TYPE_PLURAL => Some(self.post_type_plural.clone()),
            SETTING_POSTS_PER_PAGE => Some(self.posts_per_page.to_string()),
            _ => None,
        }
    }
}
