//! HTTP transport abstraction between the typed services and the wire.
//!
//! The services build [`ApiRequest`] values; an [`HttpTransport`] executes
//! them and hands back the status and decoded JSON body without judging
//! success. Status interpretation lives in the API client.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// HTTP verbs used by the backend surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single file part for a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadPart {
    /// Form field name.
    pub field: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Bytes,
}

impl fmt::Debug for UploadPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadPart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON document.
    Json(serde_json::Value),
    /// `multipart/form-data` with one file part.
    Multipart(UploadPart),
}

/// A request ready to be executed against the backend.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path relative to the configured base URL, starting with `/`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Request payload.
    pub body: RequestBody,
    /// Bearer token attached as `Authorization`, if any.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Create a request with no query, body, or token.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    /// Attach query parameters.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a multipart file part.
    pub fn with_upload(mut self, part: UploadPart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    /// Look up a query parameter by name.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The JSON body, if this request carries one.
    pub fn json_body(&self) -> Option<&serde_json::Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bodies may carry passwords and the bearer is a credential.
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("authenticated", &self.bearer.is_some())
            .finish()
    }
}

/// Raw backend answer: status plus decoded JSON body (`Null` when empty).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes requests. Transport failures are `Network` errors; any status,
/// including 4xx and 5xx, is returned as `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug + 'static {
    /// Send the request and return the raw response.
    async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse>;
}

/// Source of the bearer token attached to authenticated requests.
#[async_trait]
pub trait TokenProvider: Send + Sync + fmt::Debug + 'static {
    /// Current access token, if a session exists.
    async fn bearer_token(&self) -> Option<String>;
}
