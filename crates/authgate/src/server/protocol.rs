//! JSON bodies served by the default application.

use serde::{Deserialize, Serialize};

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; `"ok"` once the listener is serving.
    pub status: String,
    /// Configured server display name.
    pub server: String,
    /// Crate version.
    pub version: String,
}

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("not_found", "no such resource");
        assert_eq!(e.code, "not_found");
        assert!(e.message.contains("no such resource"));
    }

    #[test]
    fn health_response_serialises_server_name() {
        let h = HealthResponse {
            status: "ok".into(),
            server: "authgate".into(),
            version: "0.1.0".into(),
        };
        let json = serde_json::to_string(&h).unwrap();
        assert!(json.contains("\"server\":\"authgate\""));
    }
}
