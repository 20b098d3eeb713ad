//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the HTTP verbs the homework API
//! uses, enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Query parameters in the order they should be sent.
pub type Query = [(String, String)];

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
///
/// Only failures where no HTTP response was obtained end up here; a
/// non-2xx status is still a [`Response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Connection could not be established (refused, DNS, TLS handshake)
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Connection dropped while sending or reading
    Io(String),
    /// Invalid URL or request that could not be built
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl HttpError {
    /// Whether the request failed because the server could not be reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_)
        )
    }

    /// The underlying error message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            HttpError::ConnectionFailed(msg)
            | HttpError::Timeout(msg)
            | HttpError::Io(msg)
            | HttpError::InvalidUrl(msg)
            | HttpError::Other(msg) => msg,
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Binary part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// File name reported to the server
    pub file_name: String,
    /// MIME type of the content
    pub mime: String,
    /// File content
    pub bytes: Bytes,
}

/// A multipart form: ordered text parts followed by at most one file part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    text: Vec<(String, String)>,
    file: Option<FilePart>,
}

impl MultipartForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text part.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.text.push((name.into(), value.into()));
        self
    }

    /// Set the file part.
    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    /// Text parts in insertion order.
    pub fn text_parts(&self) -> &[(String, String)] {
        &self.text
    }

    /// The file part, if any.
    pub fn file_part(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }

    /// Names of every field in the form, file field last.
    pub fn field_names(&self) -> Vec<String> {
        self.text
            .iter()
            .map(|(name, _)| name.clone())
            .chain(self.file.iter().map(|part| part.field.clone()))
            .collect()
    }
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a mock
/// client for testing. JSON bodies are passed pre-serialized; an
/// implementation sets `Content-Type: application/json` whenever a body is
/// present.
///
/// # Example
///
/// ```ignore
/// use hwassist::traits::{HttpClient, Headers, HttpError};
///
/// async fn ping<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.get("http://localhost:5000/api/assignments", &[], &Headers::new()).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request with optional query parameters.
    async fn get(&self, url: &str, query: &Query, headers: &Headers)
        -> Result<Response, HttpError>;

    /// Perform a POST request with an optional JSON body.
    async fn post(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError>;

    /// Perform a PUT request with an optional JSON body.
    async fn put(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError>;

    /// Perform a DELETE request.
    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a multipart/form-data POST request.
    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &Headers,
    ) -> Result<Response, HttpError>;
}
