//! Typed errors for field declaration and rendering
//!
//! Field selection itself never fails: a missing request or a missing
//! parameter container degrades to "show every field" with a warning. The
//! errors below only come from the surrounding pieces:
//!
//! - [`FieldsError::DuplicateField`]: a registry was built with the same name twice
//! - [`FieldsError::Serialization`]: serde could not turn a resource into JSON
//! - [`FieldsError::NotAnObject`]: a resource did not serialize to a JSON object
//! - [`FieldsError::Config`]: the selector configuration is invalid
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_user(RequestContext(ctx): RequestContext) -> Result<Json<Value>, FieldsError> {
//!     let selection = User::selection(&SELECTOR, Some(&ctx));
//!     Ok(Json(selection.render(&user)?))
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The error type of this crate
#[derive(Debug, thiserror::Error)]
pub enum FieldsError {
    /// A field name was registered twice on the same resource
    #[error("Field '{name}' is already declared")]
    DuplicateField { name: String },

    /// The resource could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The resource serialized to something other than a JSON object
    #[error("Expected a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    /// Invalid selector configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        // Directives never fail, so every variant is a server-side fault.
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FieldsError::DuplicateField { .. } => "DUPLICATE_FIELD",
            FieldsError::Serialization(_) => "SERIALIZATION_ERROR",
            FieldsError::NotAnObject { .. } => "NOT_AN_OBJECT",
            FieldsError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for FieldsError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.error_code(), error = %self, "field rendering failed");
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

/// Name of a JSON value's kind, for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
