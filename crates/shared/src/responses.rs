//! Response bodies that are not domain payloads.

use serde::{Deserialize, Serialize};

// =============================================================================
// Error Codes
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors (4xx) ===
    /// Request was malformed or could not be parsed
    BadRequest,
    /// Request data failed validation
    ValidationError,
    /// Inventory request referenced an id missing from the catalog
    UnknownItem,

    // === Server Errors (5xx) ===
    /// Internal server error
    InternalError,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_is_snake_case() {
        let body = ErrorResponse::new(ErrorCode::UnknownItem, "Unknown item: 9");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "unknown_item");
        assert_eq!(json["message"], "Unknown item: 9");
    }

    #[test]
    fn unrecognized_error_code_maps_to_unknown() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"code":"rate_limit_exceeded","message":"slow down"}"#)
                .unwrap();
        assert_eq!(body.code, ErrorCode::Unknown);
    }

    #[test]
    fn health_ok_body() {
        let json = serde_json::to_value(HealthResponse::ok("ready")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok", "message": "ready"}));
    }
}
