// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session authentication credential and pluggable strategies

use reqwest::header::HeaderValue;

use super::headers;
use super::translator::HttpRequest;
use crate::error::{Error, Result};

/// Session-scoped authentication credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCredential {
    /// User name (Bearer: the token itself)
    pub user: String,
    /// Password
    pub password: String,
    /// Scheme name, lower-cased ("basic", "bearer", ...)
    pub scheme: String,
}

impl AuthCredential {
    /// Create a credential with an explicit scheme
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            scheme: scheme.into().to_lowercase(),
        }
    }

    /// Basic auth credential
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(user, password, "basic")
    }

    /// Bearer token credential
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(token, "", "bearer")
    }
}

/// Applies a session credential to a concrete request
///
/// The session adapter holds one strategy behind this trait; callers with
/// transport-level auth mechanisms supply their own implementation.
pub trait AuthStrategy: Send + Sync {
    /// Apply the credential to the outgoing request
    fn apply(&self, credential: &AuthCredential, request: &mut HttpRequest) -> Result<()>;
}

/// Default strategy: Basic and Bearer Authorization headers
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAuth;

impl AuthStrategy for StandardAuth {
    fn apply(&self, credential: &AuthCredential, request: &mut HttpRequest) -> Result<()> {
        let value = match credential.scheme.as_str() {
            "basic" => {
                let encoded = base64::Engine::encode(
                    &base64::engine::general_purpose::STANDARD,
                    format!("{}:{}", credential.user, credential.password),
                );
                format!("Basic {}", encoded)
            }
            "bearer" => format!("Bearer {}", credential.user),
            scheme => {
                return Err(Error::Config(format!(
                    "auth scheme '{}' requires a custom AuthStrategy",
                    scheme
                )))
            }
        };

        let value = HeaderValue::try_from(value)
            .map_err(|e| Error::header(headers::AUTHORIZATION, e.to_string()))?;
        request.headers.insert(headers::AUTHORIZATION, value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;

    fn empty_request() -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: Url::parse("http://example.com/").unwrap(),
            headers: Default::default(),
            body: None,
        }
    }

    #[test]
    fn test_basic_auth_header() {
        let mut request = empty_request();
        StandardAuth
            .apply(&AuthCredential::basic("me", "**"), &mut request)
            .unwrap();

        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Basic bWU6Kio="
        );
    }

    #[test]
    fn test_bearer_auth_header() {
        let mut request = empty_request();
        StandardAuth
            .apply(&AuthCredential::bearer("tok123"), &mut request)
            .unwrap();

        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Bearer tok123"
        );
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let mut request = empty_request();
        let err = StandardAuth
            .apply(&AuthCredential::new("u", "p", "digest"), &mut request)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_scheme_is_lowercased() {
        let credential = AuthCredential::new("u", "p", "Basic");
        assert_eq!(credential.scheme, "basic");
    }
}
