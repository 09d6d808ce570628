// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the Mustekala session core
//!
//! Failures are synchronous and surface at the call that produced them.
//! A transport rejection that still carries a parsed response is not an
//! error at this level; see [`crate::http::TransportError`].

use thiserror::Error;

/// Result type alias for Mustekala operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Mustekala session core
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport layer failed internally
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A Set-Cookie value could not be parsed
    #[error("Malformed cookie '{value}': {reason}")]
    MalformedCookie { value: String, reason: String },

    /// Base URLs with a non-root path are not supported
    #[error("Unsupported base URL '{0}': only root paths are supported")]
    UnsupportedBaseUrl(String),

    /// Transport produced no response at all (DNS, connect, timeout)
    #[error("Transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// A derived header name or value was not valid HTTP
    #[error("Invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (file uploads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a malformed cookie error
    pub fn malformed_cookie(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedCookie {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport failure error
    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Transport {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid header error
    pub fn header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Header {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Http(_))
    }

    /// Check if this is a cookie parsing failure
    pub fn is_malformed_cookie(&self) -> bool {
        matches!(self, Error::MalformedCookie { .. })
    }

    /// Get the failing URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Transport { url, .. } => Some(url),
            Error::UnsupportedBaseUrl(url) => Some(url),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error() {
        let err = Error::transport("https://example.com", "connection refused");

        assert!(err.is_transport());
        assert_eq!(err.url(), Some("https://example.com"));
    }

    #[test]
    fn test_malformed_cookie_error() {
        let err = Error::malformed_cookie("no-equals-sign", "missing '='");

        assert!(err.is_malformed_cookie());
        assert!(!err.is_transport());
        assert!(err.to_string().contains("no-equals-sign"));
    }

    #[test]
    fn test_unsupported_base_url() {
        let err = Error::UnsupportedBaseUrl("http://example.com/app".to_string());
        assert_eq!(err.url(), Some("http://example.com/app"));
    }
}
