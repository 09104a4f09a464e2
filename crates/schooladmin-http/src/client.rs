//! Typed API client shared by every service.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use schooladmin_core::error::{AppError, ErrorKind};
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{
    ApiRequest, HttpMethod, HttpTransport, TokenProvider, UploadPart,
};

use crate::error::backend_error;

/// Attaches the session bearer, executes requests, and turns non-success
/// responses into [`AppError`]s carrying the backend's message.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &self.transport)
            .field("authenticated", &self.tokens.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Client that reads the bearer from `tokens` before every request.
    pub fn new(transport: Arc<dyn HttpTransport>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            transport,
            tokens: Some(tokens),
        }
    }

    /// Client that never sends a bearer.
    pub fn anonymous(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            tokens: None,
        }
    }

    /// Execute a request and return the success body.
    pub async fn send(&self, mut request: ApiRequest) -> AppResult<Value> {
        if let Some(tokens) = &self.tokens {
            request.bearer = tokens.bearer_token().await;
        }

        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.execute(request).await.inspect_err(|e| {
            warn!(%method, path = %path, error = %e, "Backend request failed");
        })?;

        if response.is_success() {
            debug!(%method, path = %path, status = response.status, "Backend request completed");
            return Ok(response.body);
        }

        let err = backend_error(response.status, &response.body);
        warn!(
            %method,
            path = %path,
            status = response.status,
            message = %err.message,
            "Backend rejected request"
        );
        Err(err)
    }

    /// Execute a request and decode the success body into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> AppResult<T> {
        let path = request.path.clone();
        let body = self.send(request).await?;
        decode(&path, body)
    }

    /// `GET` with query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        query: Vec<(String, String)>,
    ) -> AppResult<T> {
        self.send_json(ApiRequest::new(HttpMethod::Get, path).with_query(query))
            .await
    }

    /// `POST` a JSON body.
    pub async fn post<B, T>(&self, path: impl Into<String>, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(HttpMethod::Post, path).with_json(to_json(body)?);
        self.send_json(request).await
    }

    /// `PUT` a JSON body.
    pub async fn put<B, T>(&self, path: impl Into<String>, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(HttpMethod::Put, path).with_json(to_json(body)?);
        self.send_json(request).await
    }

    /// `DELETE`; the response body is discarded.
    pub async fn delete(&self, path: impl Into<String>) -> AppResult<()> {
        self.send(ApiRequest::new(HttpMethod::Delete, path))
            .await
            .map(|_| ())
    }

    /// `POST` a single-file multipart form.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        part: UploadPart,
    ) -> AppResult<T> {
        self.send_json(ApiRequest::new(HttpMethod::Post, path).with_upload(part))
            .await
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> AppResult<Value> {
    Ok(serde_json::to_value(body)?)
}

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Unexpected response from {path}: {e}"),
            e,
        )
    })
}
