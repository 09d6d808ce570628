// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport abstraction and default reqwest implementation
//!
//! The session adapter talks to the network through the [`Transport`]
//! trait only. A conforming transport never follows redirects; a strict
//! transport that treats 3xx as exceptional reports
//! [`TransportError::Rejected`] with the parsed response attached, and the
//! adapter recovers it into a normal response.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::StatusCode;

use super::translator::HttpRequest;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Raw response handed back by a transport
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

/// Transport send failure
#[derive(Debug)]
pub enum TransportError {
    /// The transport treated the status as exceptional but a parsed
    /// response is still available (e.g. a 3xx with redirects disabled)
    Rejected {
        reason: String,
        response: TransportResponse,
    },
    /// No response could be obtained (DNS, connect, timeout, protocol)
    Failed { reason: String },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Rejected { reason, response } => {
                write!(f, "transport rejected status {}: {}", response.status, reason)
            }
            TransportError::Failed { reason } => write!(f, "transport failed: {}", reason),
        }
    }
}

impl std::error::Error for TransportError {}

/// Sends a fully-formed HTTP request and returns the raw response
///
/// Implementations must not follow redirects and must support raw, form
/// and multipart bodies (all three arrive as opaque body bytes with the
/// Content-Type already set).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request
    async fn send(
        &self,
        request: &HttpRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string
    pub user_agent: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers sent with every request
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        default_headers.insert(
            "accept-language",
            HeaderValue::from_static("en-US,en;q=0.5"),
        );
        default_headers.insert(
            "accept-encoding",
            HeaderValue::from_static("gzip, deflate, br"),
        );

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
        }
    }
}

/// Default transport backed by reqwest
///
/// Auto-redirects are always disabled; redirect policy belongs to the
/// host browser session.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: &HttpRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| TransportError::Failed {
            reason: e.to_string(),
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Failed {
                reason: e.to_string(),
            })?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new().unwrap();
        assert_eq!(transport.config().user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Failed {
            reason: "dns failure".to_string(),
        };
        assert!(err.to_string().contains("dns failure"));
    }

    #[tokio::test]
    async fn test_redirects_are_not_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/start"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("location", "/target"),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = HttpRequest {
            method: Method::GET,
            url: Url::parse(&format!("{}/start", server.uri())).unwrap(),
            headers: HeaderMap::new(),
            body: None,
        };

        let response = transport.send(&request).await.unwrap();
        assert_eq!(response.status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers.get("location").unwrap(), "/target");
    }
}
