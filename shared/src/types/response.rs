//! Stable response body shapes

use serde::{Deserialize, Serialize};

/// Stable JSON error shape returned by every endpoint
///
/// Internal error detail never reaches this structure; the API layer maps
/// domain errors to one of the coarse kinds before building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code
    pub status_code: u16,

    /// Machine-readable error kind
    pub error: String,

    /// Human-readable message
    pub message: String,
}

impl ErrorBody {
    /// Create a new error body
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Plain message response for flows that return no data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_serializes_camel_case() {
        let body = ErrorBody::new(401, "unauthorized", "Invalid credentials");
        let json = serde_json::to_string(&body).unwrap();

        assert!(json.contains("\"statusCode\":401"));
        assert!(json.contains("\"error\":\"unauthorized\""));
        assert!(json.contains("\"message\":\"Invalid credentials\""));
    }
}
