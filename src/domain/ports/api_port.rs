//! REST API port definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::ApiError;

/// Port for the JSON REST backend.
///
/// Paths are relative to the configured base URL (`/barangs`, `/barangs/7`).
/// Every call resolves to the decoded response body; an empty body reads as
/// `Value::Null`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiPort: Send + Sync {
    /// Issues a GET request.
    async fn get(&self, path: &str) -> Result<Value, ApiError>;

    /// Issues a POST request with a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    /// Issues a PUT request with a JSON body.
    async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    /// Issues a DELETE request.
    async fn delete(&self, path: &str) -> Result<Value, ApiError>;
}
