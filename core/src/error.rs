//! Error types for the remote content fetcher.
//!
//! # Design
//! Each failure kind the fetcher can detect gets its own variant so callers
//! may branch on it, even though the fetcher has already logged the failure
//! by the time it is returned.

use thiserror::Error;

/// Failures of `RemoteFetcher` operations and `WpClient` parse methods.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No base site URL is configured; no request was issued.
    #[error("no site url set")]
    ConfigurationMissing,

    /// Collection pages are numbered from 1; no request was issued.
    #[error("invalid page number {0}")]
    InvalidPage(u32),

    /// The remote answered with a status other than 200.
    #[error("remote returned HTTP {status}")]
    RemoteStatus { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 200 listing response without a usable `X-WP-TotalPages` header.
    #[error("response is missing the X-WP-TotalPages header")]
    MissingPagingHeader,

    /// The response body did not have the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// DNS, connect, timeout or protocol failure inside a `Transport`.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Failures loading `Settings`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}
