//! Remote content fetcher for mirroring a WordPress site.
//!
//! # Overview
//! Reads posts, single posts and featured-image URLs from a remote WordPress
//! REST API so a local site can copy them.
//!
//! # Design
//! - `WpClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `RemoteFetcher` runs the round-trip through an injected `Transport` and
//!   reads site URL, settings, post metadata and hooks through traits, so the
//!   host plugin stays in charge of storage.
//! - Failures are logged where they are detected and returned as values.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filters;
pub mod http;
pub mod site;
pub mod transport;
pub mod types;

pub use client::WpClient;
pub use config::Settings;
pub use error::{ConfigError, FetchError, TransportError};
pub use fetcher::{PostPages, RemoteFetcher};
pub use filters::Filters;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use site::{
    DigitsOnly, ErrorLog, IdNormalizer, MemoryMetaStore, PostMetaStore, SettingsProvider,
    SiteUrlProvider, StaticSiteUrl, TracingLog,
};
pub use transport::{Transport, UreqTransport};
pub use types::{MediaAttachment, PageResult};
