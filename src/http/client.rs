// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session adapter called by the host browser session
//!
//! Owns the session-scoped custom headers and auth credential, shares the
//! cookie jar with the host by reference, and chains translation,
//! transport send and response normalization for each navigation step.
//! Redirect following, history and the document model stay in the host.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use reqwest::Method;
use tracing::{debug, warn};
use url::Url;

use super::auth::{AuthCredential, AuthStrategy};
use super::cookie::{Cookie, CookieJar};
use super::request::{BrowserRequest, ParamValue};
use super::response::Response;
use super::translator::{RequestTranslator, SessionState};
use super::transport::{ReqwestTransport, Transport, TransportConfig, TransportError};
use crate::error::{Error, Result};

/// Session adapter: one logical browsing session over a swappable transport
pub struct Client {
    transport: Arc<dyn Transport>,
    translator: RequestTranslator,
    state: Arc<RwLock<SessionState>>,
    cookie_jar: CookieJar,
    base_url: Option<Url>,
}

impl Client {
    /// Create a client with the default reqwest transport
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a client with custom transport configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::with_config(
            config,
        )?)))
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            translator: RequestTranslator::new(),
            state: Arc::new(RwLock::new(SessionState::default())),
            cookie_jar: CookieJar::new(),
            base_url: None,
        }
    }

    /// Replace the transport
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    /// Replace the auth strategy
    pub fn set_auth_strategy(&mut self, auth: Arc<dyn AuthStrategy>) {
        self.translator = RequestTranslator::with_auth_strategy(auth);
    }

    /// Set the base URL used to resolve relative request URIs
    ///
    /// Base URLs with a non-root path are rejected here rather than
    /// producing silently wrong URLs later.
    pub fn set_base_url(&mut self, url: impl AsRef<str>) -> Result<()> {
        let url = Url::parse(url.as_ref())?;
        if !matches!(url.path(), "" | "/") {
            return Err(Error::UnsupportedBaseUrl(url.to_string()));
        }
        self.base_url = Some(url);
        Ok(())
    }

    /// Get the base URL
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Check if the base URL scheme is https
    pub fn is_secure_base(&self) -> bool {
        self.base_url
            .as_ref()
            .map_or(false, |url| url.scheme() == "https")
    }

    /// Get the session cookie jar; cloning shares the same storage
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Set a session header applied to every request until removed
    pub fn set_header(&self, name: impl AsRef<str>, value: impl Into<String>) {
        self.state
            .write()
            .headers
            .insert(name.as_ref().to_lowercase(), value.into());
    }

    /// Remove a session header
    pub fn remove_header(&self, name: impl AsRef<str>) {
        self.state.write().headers.remove(&name.as_ref().to_lowercase());
    }

    /// Clear all session headers
    pub fn reset_headers(&self) {
        self.state.write().headers.clear();
    }

    /// Snapshot of the current session headers
    pub fn custom_headers(&self) -> std::collections::HashMap<String, String> {
        self.state.read().headers.clone()
    }

    /// Set Basic auth credentials
    pub fn set_auth(&self, user: impl Into<String>, password: impl Into<String>) {
        self.set_auth_credential(AuthCredential::basic(user, password));
    }

    /// Set an explicit auth credential
    pub fn set_auth_credential(&self, credential: AuthCredential) {
        self.state.write().auth = Some(credential);
    }

    /// Clear the auth credential
    pub fn reset_auth(&self) {
        self.state.write().auth = None;
    }

    /// Get the current auth credential
    pub fn auth(&self) -> Option<AuthCredential> {
        self.state.read().auth.clone()
    }

    /// Reset session headers and auth to a freshly constructed state
    ///
    /// The shared cookie jar is owned by the host session, which clears it
    /// as part of its own restart; the shared reference stays valid.
    pub fn restart(&self) {
        self.reset_headers();
        self.reset_auth();
    }

    /// Resolve a request URI, joining relative URIs against the base URL
    pub fn resolve_url(&self, uri: &str) -> Result<Url> {
        match Url::parse(uri) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => Ok(base.join(uri)?),
                None => Err(Error::Config(format!(
                    "relative URL '{}' requires a base URL",
                    uri
                ))),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Build an abstract request with the URI resolved against the base URL
    pub fn request(&self, method: Method, uri: &str) -> Result<BrowserRequest> {
        Ok(BrowserRequest::for_url(method, self.resolve_url(uri)?))
    }

    /// Perform a GET request
    pub async fn get(&self, uri: &str) -> Result<Response> {
        self.perform(self.request(Method::GET, uri)?).await
    }

    /// Perform a POST request with form parameters
    pub async fn post(
        &self,
        uri: &str,
        parameters: Vec<(String, ParamValue)>,
    ) -> Result<Response> {
        let mut request = self.request(Method::POST, uri)?;
        request.parameters = parameters;
        self.perform(request).await
    }

    /// Perform one navigation step
    ///
    /// Translates the abstract request, sends it, and normalizes the
    /// outcome. A transport that rejects a status but still produced a
    /// parsed response (a strict transport on a 3xx) is recovered into a
    /// normal response; a transport failure with no response is fatal for
    /// this call and never retried here. No shared session state is
    /// mutated; cookie write-back is driven by the host via
    /// [`Client::update_cookies_from`].
    pub async fn perform(&self, request: BrowserRequest) -> Result<Response> {
        let state = self.state.read().clone();
        let concrete = self.translator.translate(&request, &state, &self.cookie_jar)?;
        let url = concrete.url.clone();

        let start = Instant::now();
        debug!(method = %concrete.method, url = %url, "dispatching request");

        match self.transport.send(&concrete).await {
            Ok(raw) => {
                let response = Response::from_transport(raw, url);
                debug!(
                    status = response.status_code(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "request completed"
                );
                Ok(response)
            }
            Err(TransportError::Rejected { reason, response }) => {
                debug!(
                    status = response.status.as_u16(),
                    %reason,
                    "transport rejected status, recovering response"
                );
                Ok(Response::from_transport(response, url))
            }
            Err(TransportError::Failed { reason }) => Err(Error::transport(url.as_str(), reason)),
        }
    }

    /// Update the shared cookie jar from a response's Set-Cookie headers
    ///
    /// Malformed cookies are logged and skipped at this boundary; use
    /// [`CookieJar::update_from_response`] directly for loud failures.
    pub fn update_cookies_from(&self, response: &Response) {
        for header in response.set_cookies() {
            match Cookie::parse(header, &response.url) {
                Ok(cookie) => self.cookie_jar.set(cookie),
                Err(e) => warn!(header, error = %e, "skipping malformed Set-Cookie header"),
            }
        }
    }
}
