//! REST API error types.

use thiserror::Error;

/// API client error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request timed out")]
    Timeout,

    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Returns HTTP status code if the backend answered.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the request never reached the backend.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        assert_eq!(ApiError::status(404, "not found").status_code(), Some(404));
        assert_eq!(ApiError::Timeout.status_code(), None);
    }

    #[test]
    fn test_network_classification() {
        assert!(ApiError::network("refused").is_network_error());
        assert!(ApiError::Timeout.is_network_error());
        assert!(!ApiError::decode("eof").is_network_error());
    }

    #[test]
    fn test_display() {
        let err = ApiError::status(422, "kode sudah dipakai");
        assert_eq!(err.to_string(), "backend returned HTTP 422: kode sudah dipakai");
    }
}
