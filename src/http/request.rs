// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Abstract browser request types
//!
//! A [`BrowserRequest`] describes a navigation or submission action
//! independently of the transport: nested form parameters, file uploads,
//! simulated server variables, and optional raw body content. The
//! translator turns it into a concrete HTTP request.

use std::path::PathBuf;

use bytes::Bytes;
use reqwest::Method;
use url::Url;

use crate::error::Result;

/// A form parameter value: a leaf string or an ordered nested mapping
///
/// Nested mappings model array-style field names and flatten to bracket
/// notation (`outer[inner]`) at any depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Leaf value
    Value(String),
    /// Ordered nested mapping
    Map(Vec<(String, ParamValue)>),
}

impl ParamValue {
    /// Build a nested mapping value
    pub fn map<K: Into<String>>(entries: Vec<(K, ParamValue)>) -> Self {
        ParamValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Value(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Value(s)
    }
}

/// A file attached to a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Local file to read the part body from (empty = failed upload, skipped)
    pub source_path: PathBuf,
    /// File name declared to the server; source basename when absent
    pub file_name: Option<String>,
}

impl FileUpload {
    /// Create an upload reading from the given path
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            file_name: None,
        }
    }

    /// Declare the file name sent to the server
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// The file name the server will see
    pub fn declared_name(&self) -> String {
        match &self.file_name {
            Some(name) => name.clone(),
            None => self
                .source_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}

/// A file field entry: a single upload or an ordered nested mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEntry {
    /// Single upload
    Upload(FileUpload),
    /// Nested array of uploads, flattened with bracket notation
    Map(Vec<(String, FileEntry)>),
}

impl From<FileUpload> for FileEntry {
    fn from(upload: FileUpload) -> Self {
        FileEntry::Upload(upload)
    }
}

/// Abstract outbound request supplied by the host browser session
///
/// The URL must already be absolute; base-URL joining happens in the
/// session adapter before this type is built.
#[derive(Debug, Clone)]
pub struct BrowserRequest {
    /// Request method
    pub method: Method,
    /// Absolute request URL
    pub url: Url,
    /// Ordered form parameters, possibly nested
    pub parameters: Vec<(String, ParamValue)>,
    /// Ordered file fields, possibly nested
    pub files: Vec<(String, FileEntry)>,
    /// Simulated server environment (HTTP_* and CONTENT_* keys)
    pub server: Vec<(String, String)>,
    /// Raw body content; wins over parameters for body construction
    pub raw_content: Option<Bytes>,
}

impl BrowserRequest {
    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            parameters: Vec::new(),
            files: Vec::new(),
            server: Vec::new(),
            raw_content: None,
        })
    }

    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a request for an already parsed URL
    pub fn for_url(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            parameters: Vec::new(),
            files: Vec::new(),
            server: Vec::new(),
            raw_content: None,
        }
    }

    /// Add a form parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Add a file field
    pub fn file(mut self, name: impl Into<String>, entry: impl Into<FileEntry>) -> Self {
        self.files.push((name.into(), entry.into()));
        self
    }

    /// Set a simulated server variable, overwriting a previous value
    pub fn server_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.server.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.server.push((name, value)),
        }
        self
    }

    /// Set raw body content
    pub fn raw(mut self, content: impl Into<Bytes>) -> Self {
        self.raw_content = Some(content.into());
        self
    }
}

/// Flatten nested parameters into ordered (name, value) leaves
///
/// Each recursive call returns its own sequence; callers concatenate.
pub(crate) fn flatten_parameters(parameters: &[(String, ParamValue)]) -> Vec<(String, String)> {
    parameters
        .iter()
        .flat_map(|(name, value)| flatten_parameter(name, value))
        .collect()
}

fn flatten_parameter(name: &str, value: &ParamValue) -> Vec<(String, String)> {
    match value {
        ParamValue::Value(v) => vec![(name.to_string(), v.clone())],
        ParamValue::Map(entries) => entries
            .iter()
            .flat_map(|(key, nested)| flatten_parameter(&format!("{}[{}]", name, key), nested))
            .collect(),
    }
}

/// Flatten nested file fields into ordered (name, upload) leaves
///
/// An upload with an empty source path represents a failed upload and is
/// skipped entirely.
pub(crate) fn flatten_files(files: &[(String, FileEntry)]) -> Vec<(String, FileUpload)> {
    files
        .iter()
        .flat_map(|(name, entry)| flatten_file(name, entry))
        .collect()
}

fn flatten_file(name: &str, entry: &FileEntry) -> Vec<(String, FileUpload)> {
    match entry {
        FileEntry::Upload(upload) => {
            if upload.source_path.as_os_str().is_empty() {
                Vec::new()
            } else {
                vec![(name.to_string(), upload.clone())]
            }
        }
        FileEntry::Map(entries) => entries
            .iter()
            .flat_map(|(key, nested)| flatten_file(&format!("{}[{}]", name, key), nested))
            .collect(),
    }
}
