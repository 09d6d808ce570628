// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Abstract request to concrete HTTP request translation
//!
//! The translator is a pure function of the abstract request, the session
//! state and the cookie jar: it derives headers from simulated server
//! variables, overlays session headers, builds the body (query string,
//! raw, multipart or urlencoded form), attaches the Cookie header and
//! applies the session credential.

use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use super::auth::{AuthCredential, AuthStrategy, StandardAuth};
use super::cookie::CookieJar;
use super::encoding::form_urlencode;
use super::headers;
use super::request::{flatten_files, flatten_parameters, BrowserRequest, FileEntry, ParamValue};
use crate::error::{Error, Result};

/// Fully-formed transport-agnostic HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: Method,
    /// Absolute request URL, query string included
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Encoded request body
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Session-scoped state read while building a request
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Custom session headers, keyed by lower-cased name
    pub headers: HashMap<String, String>,
    /// Credential applied to every request until reset
    pub auth: Option<AuthCredential>,
}

/// Builds concrete HTTP requests from abstract browser requests
pub struct RequestTranslator {
    auth: Arc<dyn AuthStrategy>,
}

impl Default for RequestTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTranslator {
    /// Create a translator with the standard auth strategy
    pub fn new() -> Self {
        Self {
            auth: Arc::new(StandardAuth),
        }
    }

    /// Create a translator with a custom auth strategy
    pub fn with_auth_strategy(auth: Arc<dyn AuthStrategy>) -> Self {
        Self { auth }
    }

    /// Translate an abstract request into a concrete HTTP request
    pub fn translate(
        &self,
        request: &BrowserRequest,
        state: &SessionState,
        jar: &CookieJar,
    ) -> Result<HttpRequest> {
        let mut headers = HeaderMap::new();

        // Simulated server variables: HTTP_* keys become headers with the
        // prefix stripped, CONTENT_* body headers pass through unprefixed,
        // everything else is environment rather than a transport header.
        for (key, value) in &request.server {
            let key = key.to_lowercase().replace('_', "-");
            let name = if let Some(stripped) = key.strip_prefix("http-") {
                stripped.to_string()
            } else if matches!(
                key.as_str(),
                headers::CONTENT_LENGTH | headers::CONTENT_MD5 | headers::CONTENT_TYPE
            ) {
                key
            } else {
                continue;
            };
            insert_header(&mut headers, &name, value)?;
        }

        // Session headers win over derived ones on a name collision
        for (name, value) in &state.headers {
            insert_header(&mut headers, name, value)?;
        }

        let mut url = request.url.clone();
        let mut body = None;

        if request.method == Method::GET || request.method == Method::HEAD {
            let flat = flatten_parameters(&request.parameters);
            if !flat.is_empty() {
                append_query(&mut url, &flat);
            }
        } else if let Some(ref raw) = request.raw_content {
            body = Some(raw.clone());
        } else if !request.files.is_empty() {
            let boundary = generate_boundary();
            body = Some(encode_multipart(
                &boundary,
                &request.parameters,
                &request.files,
            )?);
            // The multipart content type wins over any colliding header
            insert_header(
                &mut headers,
                headers::CONTENT_TYPE,
                &format!("multipart/form-data; boundary=\"{}\"", boundary),
            )?;
        } else {
            let flat = flatten_parameters(&request.parameters);
            body = Some(Bytes::from(form_urlencode(&flat)));
            if !headers.contains_key(headers::CONTENT_TYPE) {
                headers.insert(
                    headers::CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
            }
        }

        if let Some(cookie_header) = jar.cookie_header_for(&url) {
            insert_header(&mut headers, headers::COOKIE, &cookie_header)?;
        }

        let mut concrete = HttpRequest {
            method: request.method.clone(),
            url,
            headers,
            body,
        };

        if let Some(ref credential) = state.auth {
            self.auth.apply(credential, &mut concrete)?;
        }

        Ok(concrete)
    }
}

fn insert_header(headers: &mut HeaderMap, raw_name: &str, value: &str) -> Result<()> {
    let name =
        HeaderName::try_from(raw_name).map_err(|e| Error::header(raw_name, e.to_string()))?;
    let value =
        HeaderValue::try_from(value).map_err(|e| Error::header(raw_name, e.to_string()))?;
    headers.insert(name, value);
    Ok(())
}

/// Merge flattened parameters into the URL query string
fn append_query(url: &mut Url, pairs: &[(String, String)]) {
    let encoded = form_urlencode(pairs);
    let merged = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{}&{}", existing, encoded),
        _ => encoded,
    };
    url.set_query(Some(&merged));
}

/// Unique multipart boundary per request
fn generate_boundary() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!(
        "mustekala{:x}{:x}{:x}",
        duration.as_secs(),
        duration.subsec_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Encode flattened parameters and files as a multipart/form-data body
fn encode_multipart(
    boundary: &str,
    parameters: &[(String, ParamValue)],
    files: &[(String, FileEntry)],
) -> Result<Bytes> {
    let mut body: Vec<u8> = Vec::new();

    for (name, value) in flatten_parameters(parameters) {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\nContent-Length: {}\r\n\r\n",
                boundary,
                name,
                value.len()
            )
            .as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (name, upload) in flatten_files(files) {
        let contents = fs::read(&upload.source_path)?;
        let filename = upload.declared_name();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Length: {}\r\nContent-Type: {}\r\n\r\n",
                boundary,
                name,
                filename,
                contents.len(),
                content_type_for(&filename)
            )
            .as_bytes(),
        );
        body.extend_from_slice(&contents);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    Ok(Bytes::from(body))
}

/// Infer a part content type from the file extension
fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
