// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Mustekala - Headless Web Client Session Core
//!
//! A pure Rust session core for headless web browsing: it turns abstract
//! browser actions (navigate, submit a form, upload files) into correctly
//! formed HTTP requests and normalizes the raw responses, while carrying
//! cookies, custom headers and credentials across a multi-request session.
//! A host browser session supplies history, redirect policy and the DOM
//! query surface; this crate supplies the request/response contract they
//! plug into.
//!
//! ## Features
//!
//! - Request translation: nested form fields, file uploads (multipart),
//!   raw bodies, simulated server variables
//! - Session cookie jar: domain/path/secure scoping, wire-value fidelity,
//!   expiry sweeping
//! - Session state: custom headers, Basic/Bearer auth, restartable
//! - Swappable transport and auth strategies behind traits
//! - Redirects are never followed internally - that decision stays with
//!   the host session
//!
//! ## Example
//!
//! ```rust,no_run
//! use mustekala::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new()?;
//!     client.set_header("X-Requested-With", "mustekala");
//!
//!     let response = client.get("https://example.com/").await?;
//!     println!("{} {} bytes", response.status_code(), response.body_len());
//!
//!     // Cookie write-back is the host session's decision
//!     client.update_cookies_from(&response);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Re-exports for convenience

// Session adapter
pub use http::{Client, SessionState};

// Abstract requests
pub use http::{BrowserRequest, FileEntry, FileUpload, ParamValue};

// Translation
pub use http::{HttpRequest, RequestTranslator};

// Cookies
pub use http::{Cookie, CookieJar};

// Responses
pub use http::Response;

// Transport
pub use http::{ReqwestTransport, Transport, TransportConfig, TransportError, TransportResponse};

// Auth
pub use http::{AuthCredential, AuthStrategy, StandardAuth};

// Errors
pub use error::{Error, Result};

/// Mustekala version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
