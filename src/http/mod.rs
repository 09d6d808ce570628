// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP session layer for the Mustekala client
//!
//! Translates abstract browser actions (navigate, submit, upload) into
//! fully-formed HTTP requests, carries cookies/headers/auth across a
//! session, and normalizes transport responses. Redirect following and
//! history belong to the host browser session.

mod auth;
mod client;
mod cookie;
mod encoding;
mod request;
mod response;
mod translator;
mod transport;

pub use auth::{AuthCredential, AuthStrategy, StandardAuth};
pub use client::Client;
pub use cookie::{Cookie, CookieJar};
pub use request::{BrowserRequest, FileEntry, FileUpload, ParamValue};
pub use response::Response;
pub use translator::{HttpRequest, RequestTranslator, SessionState};
pub use transport::{ReqwestTransport, Transport, TransportConfig, TransportError, TransportResponse};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    pub const AUTHORIZATION: &str = "authorization";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const CONTENT_MD5: &str = "content-md5";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
}
