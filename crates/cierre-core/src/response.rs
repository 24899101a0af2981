//! JSON response envelope.
//!
//! Every API result is `{"success": true, "data": ...}` on the happy path
//! and `{"success": false, "error": {"code", "message", "details"?}}` on
//! failure. Error bodies are built here so service error enums and the
//! shared [`crate::error::AppError`] stay in the same shape.

use serde::Serialize;
use serde_json::Value;

/// Success envelope wrapping a response payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` in a success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload, for mutations with nothing to echo.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
        }
    }
}

/// Build the failure envelope body.
pub fn error_body(code: &str, message: &str, details: Option<Value>) -> Value {
    let mut error = serde_json::json!({
        "code": code,
        "message": message,
    });
    if let Some(details) = details {
        error["details"] = details;
    }
    serde_json::json!({
        "success": false,
        "error": error,
    })
}
