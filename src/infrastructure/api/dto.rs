use serde::Deserialize;

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message, when the backend sends one.
    #[serde(default)]
    pub message: Option<String>,
}
