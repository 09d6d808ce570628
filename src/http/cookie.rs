// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie model and session cookie jar
//!
//! Cookies keep both the wire (percent-encoded) value and the decoded
//! value; outbound headers always reuse the wire form so a parsed cookie
//! round-trips byte-for-byte.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use url::Url;

use super::encoding::{percent_decode, percent_encode};
use super::response::Response;
use crate::error::{Error, Result};

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Decoded cookie value
    pub value: String,
    /// Wire (percent-encoded) cookie value
    pub raw_value: String,
    /// Domain the cookie belongs to (empty = any host)
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
}

impl Cookie {
    /// Create a new cookie from a decoded value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            raw_value: percent_encode(&value),
            value,
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
        }
    }

    /// Create a new cookie from a pre-encoded wire value
    pub fn from_raw(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        let raw_value = raw_value.into();
        Self {
            name: name.into(),
            value: percent_decode(&raw_value),
            raw_value,
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into().trim_start_matches('.').to_lowercase();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set secure flag
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(false, |exp| exp <= now)
    }

    /// Check if the cookie is expired now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check if the cookie applies to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !self.domain_matches(host) {
            return false;
        }

        if !url.path().starts_with(&self.path) {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        !self.is_expired()
    }

    /// Check if two cookies share the same (name, domain, path) identity
    pub fn same_identity(&self, other: &Cookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }

    fn domain_matches(&self, host: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }

        let host = host.to_lowercase();
        host == self.domain || host.ends_with(&format!(".{}", self.domain))
    }

    /// Parse a Set-Cookie header value relative to the request URL
    ///
    /// The first `name=value` segment is the wire form; `domain` defaults
    /// to empty and `path` to the request URL's directory when the
    /// attributes are absent. Unrecognized attributes are ignored.
    pub fn parse(header: &str, url: &Url) -> Result<Self> {
        let mut parts = header.split(';');
        let first = parts
            .next()
            .map(str::trim)
            .unwrap_or_default();

        let (name, raw_value) = first
            .split_once('=')
            .ok_or_else(|| Error::malformed_cookie(header, "first segment contains no '='"))?;

        let mut cookie = Cookie::from_raw(name.trim(), raw_value.trim());
        cookie.path = default_path(url);

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" => {
                        cookie.domain = val.trim_start_matches('.').to_lowercase();
                    }
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        cookie.expires = Some(parse_http_date(val).ok_or_else(|| {
                            Error::malformed_cookie(
                                header,
                                format!("unparsable expires date '{}'", val),
                            )
                        })?);
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                        }
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Ok(cookie)
    }

    /// Convert to outbound Cookie header form using the wire value
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.raw_value)
    }
}

/// Directory of the URL path, up to the last `/`
fn default_path(url: &Url) -> String {
    let path = url.path();
    match path.rfind('/') {
        Some(idx) if idx > 0 => path[..idx].to_string(),
        _ => "/".to_string(),
    }
}

/// Parse an HTTP-date in the formats seen in Set-Cookie headers
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // Legacy netscape formats, e.g. "Wednesday, 09-Jun-2021 10:18:14 GMT"
    for format in ["%A, %d-%b-%Y %H:%M:%S GMT", "%a, %d-%b-%Y %H:%M:%S GMT"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Ordered cookie storage shared between the session adapter and the host
///
/// Cloning shares the underlying storage, so the host browser session and
/// the session adapter observe the same jar.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Arc<RwLock<Vec<Cookie>>>,
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a cookie by its (name, domain, path) identity
    ///
    /// Replacement keeps the original insertion position.
    pub fn set(&self, cookie: Cookie) {
        let mut cookies = self.cookies.write();
        match cookies.iter_mut().find(|c| c.same_identity(&cookie)) {
            Some(existing) => *existing = cookie,
            None => cookies.push(cookie),
        }
    }

    /// Remove all cookies expired at the given instant
    pub fn sweep_expired(&self, now: DateTime<Utc>) {
        self.cookies.write().retain(|c| !c.is_expired_at(now));
    }

    /// Not yet expired name/value pairs applicable to the given URL
    ///
    /// `raw` selects the wire value over the decoded value. Pairs keep
    /// store order; a same-name collision keeps the first position with
    /// the last-inserted value.
    pub fn values_for(&self, url: &Url, raw: bool) -> Vec<(String, String)> {
        self.sweep_expired(Utc::now());

        let cookies = self.cookies.read();
        let mut values: Vec<(String, String)> = Vec::new();
        for cookie in cookies.iter() {
            if !cookie.matches(url) {
                continue;
            }

            let value = if raw {
                cookie.raw_value.clone()
            } else {
                cookie.value.clone()
            };

            match values.iter_mut().find(|(name, _)| *name == cookie.name) {
                Some(entry) => entry.1 = value,
                None => values.push((cookie.name.clone(), value)),
            }
        }

        values
    }

    /// Outbound Cookie header value for a URL, using wire values
    pub fn cookie_header_for(&self, url: &Url) -> Option<String> {
        let values = self.values_for(url, true);
        if values.is_empty() {
            return None;
        }

        Some(
            values
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Update the jar from every Set-Cookie header of a response
    ///
    /// Each header occurrence is one cookie string. Parsing fails loudly;
    /// callers that prefer log-and-skip do so at the session boundary.
    pub fn update_from_response(&self, response: &Response, url: &Url) -> Result<()> {
        for header in response.set_cookies() {
            self.set(Cookie::parse(header, url)?);
        }
        Ok(())
    }

    /// All cookies currently in the jar, in insertion order
    pub fn all(&self) -> Vec<Cookie> {
        self.cookies.read().clone()
    }

    /// All cookies applicable to a URL
    pub fn matching(&self, url: &Url) -> Vec<Cookie> {
        self.cookies
            .read()
            .iter()
            .filter(|c| c.matches(url))
            .cloned()
            .collect()
    }

    /// Remove a specific cookie by identity
    pub fn remove(&self, name: &str, domain: &str, path: &str) {
        self.cookies
            .write()
            .retain(|c| c.name != name || c.domain != domain || c.path != path);
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.cookies.write().clear();
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.read().len()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.cookies.read().is_empty()
    }

    /// Export all cookies as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.cookies.read())
    }

    /// Import cookies from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        let jar = CookieJar::new();
        for cookie in cookies {
            jar.set(cookie);
        }
        Ok(jar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_cookie_parsing() {
        let header = "session=abc123; Domain=example.com; Path=/; Secure; HttpOnly";
        let cookie = Cookie::parse(header, &url("https://example.com/path")).unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure);
        assert!(cookie.http_only);
    }

    #[test]
    fn test_parse_rejects_missing_equals() {
        let err = Cookie::parse("no-equals-here", &url("http://example.com/")).unwrap_err();
        assert!(err.is_malformed_cookie());
    }

    #[test]
    fn test_parse_rejects_bad_expires() {
        let err = Cookie::parse(
            "name=value; expires=not-a-date",
            &url("http://example.com/"),
        )
        .unwrap_err();
        assert!(err.is_malformed_cookie());
    }

    #[test]
    fn test_parse_expires_formats() {
        for header in [
            "a=b; expires=Wed, 09 Jun 2100 10:18:14 GMT",
            "a=b; expires=Wednesday, 09-Jun-2100 10:18:14 GMT",
        ] {
            let cookie = Cookie::parse(header, &url("http://example.com/")).unwrap();
            assert!(cookie.expires.is_some(), "failed for {}", header);
            assert!(!cookie.is_expired());
        }
    }

    #[test]
    fn test_parse_defaults() {
        let cookie = Cookie::parse("a=b", &url("http://example.com/foo/bar")).unwrap();
        assert_eq!(cookie.domain, "");
        assert_eq!(cookie.path, "/foo");

        let cookie = Cookie::parse("a=b", &url("http://example.com/")).unwrap();
        assert_eq!(cookie.path, "/");
    }

    #[test]
    fn test_raw_value_round_trip() {
        let cookie = Cookie::parse("name=sp%20ace%3B", &url("http://example.com/")).unwrap();
        assert_eq!(cookie.value, "sp ace;");
        assert_eq!(cookie.raw_value, "sp%20ace%3B");
        assert_eq!(cookie.to_header_value(), "name=sp%20ace%3B");
    }

    #[test]
    fn test_new_encodes_value() {
        let cookie = Cookie::new("name", "a value;");
        assert_eq!(cookie.raw_value, "a+value%3B");
        assert_eq!(percent_decode(&cookie.raw_value), cookie.value);
    }

    #[test]
    fn test_domain_suffix_matching() {
        let cookie = Cookie::new("test", "1").domain("example.com");
        assert!(cookie.matches(&url("http://example.com/")));
        assert!(cookie.matches(&url("http://www.example.com/")));
        assert!(cookie.matches(&url("http://WWW.EXAMPLE.COM/")));
        assert!(!cookie.matches(&url("http://notexample.com/")));
    }

    #[test]
    fn test_empty_domain_matches_any_host() {
        let cookie = Cookie::new("test", "1");
        assert!(cookie.matches(&url("http://example.com/")));
        assert!(cookie.matches(&url("http://other.org/")));
    }

    #[test]
    fn test_secure_requires_https() {
        let cookie = Cookie::new("test", "1").secure(true);
        assert!(cookie.matches(&url("https://example.com/")));
        assert!(!cookie.matches(&url("http://example.com/")));
    }

    #[test]
    fn test_path_prefix_matching() {
        let cookie = Cookie::new("test", "1").path("/admin");
        assert!(cookie.matches(&url("http://example.com/admin")));
        assert!(cookie.matches(&url("http://example.com/admin/users")));
        assert!(!cookie.matches(&url("http://example.com/")));
    }

    #[test]
    fn test_jar_upsert_by_identity() {
        let jar = CookieJar::new();
        jar.set(Cookie::new("test", "old"));
        jar.set(Cookie::new("other", "456"));
        jar.set(Cookie::new("test", "new"));

        assert_eq!(jar.len(), 2);
        let values = jar.values_for(&url("http://example.com/"), false);
        assert_eq!(
            values,
            vec![
                ("test".to_string(), "new".to_string()),
                ("other".to_string(), "456".to_string()),
            ]
        );
    }

    #[test]
    fn test_jar_distinct_paths_are_distinct_identities() {
        let jar = CookieJar::new();
        jar.set(Cookie::new("test", "root"));
        jar.set(Cookie::new("test", "admin").path("/admin"));
        assert_eq!(jar.len(), 2);
    }

    #[test]
    fn test_jar_sweep_expired() {
        let jar = CookieJar::new();
        jar.set(Cookie::new("stale", "1").expires(Utc::now() - chrono::Duration::hours(1)));
        jar.set(Cookie::new("fresh", "2"));

        jar.sweep_expired(Utc::now());
        assert_eq!(jar.len(), 1);
        assert_eq!(jar.all()[0].name, "fresh");
    }

    #[test]
    fn test_cookie_header_uses_raw_values_in_order() {
        let jar = CookieJar::new();
        jar.set(Cookie::from_raw("test", "12%203"));
        jar.set(Cookie::new("other", "456"));

        let header = jar.cookie_header_for(&url("http://example.com/")).unwrap();
        assert_eq!(header, "test=12%203; other=456");
    }

    #[test]
    fn test_jar_ignores_port_for_matching() {
        let jar = CookieJar::new();
        jar.set(Cookie::new("test", "123").domain("www.example.com"));
        let header = jar
            .cookie_header_for(&url("http://www.example.com:8000/"))
            .unwrap();
        assert_eq!(header, "test=123");
    }

    #[test]
    fn test_jar_json_round_trip() {
        let jar = CookieJar::new();
        jar.set(Cookie::new("test", "123").domain("example.com").secure(true));

        let restored = CookieJar::from_json(&jar.to_json().unwrap()).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.all()[0].name, "test");
        assert!(restored.all()[0].secure);
    }
}
