//! Error types for the API module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the groups.io API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The login handshake was rejected.
    #[error("authentication failed (HTTP {status}): {body}")]
    AuthFailed {
        /// The HTTP status returned by the login endpoint.
        status: u16,
        /// The response body, for operator diagnosis.
        body: String,
    },

    /// A listing page claims more data exists but supplies no item array.
    ///
    /// Continuing would silently truncate the listing, so this is fatal to
    /// the listing operation.
    #[error("protocol violation listing {route}: page reports has_more but carries no data array")]
    ProtocolViolation {
        /// The listing route that misbehaved.
        route: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response on a photo download (4xx, 5xx).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// A 200 listing response whose body could not be decoded.
    #[error("failed to decode response from {route}: {source}")]
    Decode {
        /// The listing route whose body was malformed.
        route: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// File system error while writing downloaded bytes.
    #[error("IO error writing to {path:?}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl ApiError {
    /// Creates an authentication-failed error.
    pub fn auth_failed(status: u16, body: impl Into<String>) -> Self {
        Self::AuthFailed {
            status,
            body: body.into(),
        }
    }

    /// Creates a protocol-violation error for a listing route.
    pub fn protocol_violation(route: impl Into<String>) -> Self {
        Self::ProtocolViolation {
            route: route.into(),
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error for a listing route.
    pub fn decode(route: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            route: route.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` or
// `From<std::io::Error>` because our error variants require context
// (url, route, path) that the source errors don't provide. The helper
// constructor methods are the correct pattern here.
