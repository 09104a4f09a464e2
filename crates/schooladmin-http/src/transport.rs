//! `reqwest` implementation of [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};
use serde_json::Value;

use schooladmin_core::config::ApiConfig;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody};

use crate::error::map_reqwest_error;

/// Sends requests to the configured backend over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a transport from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid api.base_url '{}': {e}", config.base_url))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for a request path plus its query string.
    fn url_for(&self, request: &ApiRequest) -> AppResult<Url> {
        let raw = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::internal(format!("Invalid request URL '{raw}': {e}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Decode a response body: empty is `Null`, non-JSON text is a string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.url_for(&request)?;
        let mut builder = self.client.request(method_of(request.method), url);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(upload) => {
                let part = Part::bytes(upload.bytes.to_vec())
                    .file_name(upload.file_name)
                    .mime_str(&upload.content_type)
                    .map_err(map_reqwest_error)?;
                builder.multipart(Form::new().part(upload.field, part))
            }
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(ApiResponse {
            status,
            body: decode_body(&bytes),
        })
    }
}
