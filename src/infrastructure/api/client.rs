//! REST backend HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::dto::ErrorResponse;
use crate::domain::errors::ApiError;
use crate::domain::ports::ApiPort;

const USER_AGENT: &str = concat!("tokoterm/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON REST client bound to one base URL.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Creates client with the default timeout.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or HTTP client creation fails.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates client with a custom request timeout.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or HTTP client creation fails.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins the base URL and a request path with exactly one slash.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(path);

        debug!(method = %method, url = %url, "Sending request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(method = %method, url = %url, error = %e, "Request failed");
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_connect() {
                ApiError::network(format!("failed to connect to {}", self.base_url))
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let error = Self::handle_error_response(status, response).await;
            warn!(method = %method, url = %url, error = %error, "Backend rejected request");
            return Err(error);
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read response body");
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse response");
            ApiError::decode(format!("failed to parse response: {e}"))
        })
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse {
                message: Some(message),
            }) => message,
            _ => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };

        ApiError::status(status.as_u16(), message)
    }
}

/// Validates a base URL and strips its trailing slash.
///
/// # Errors
/// Returns error unless the URL parses and uses `http` or `https`.
pub fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(base_url.trim())
        .map_err(|e| ApiError::invalid_request(format!("invalid base URL {base_url:?}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::invalid_request(format!(
            "unsupported URL scheme {:?}",
            parsed.scheme()
        )));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[async_trait]
impl ApiPort for RestClient {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None).await
    }
}
