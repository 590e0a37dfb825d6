//! Error handling module for the directory backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the
//! `{detail}` / `{detail, errors}` response bodies the frontend expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Shaping error kinds as constants to avoid stringly-typed errors.
pub mod kinds {
    pub const MISSING: &str = "missing";
    pub const STRING_TYPE: &str = "string_type";
    pub const BOOL_TYPE: &str = "bool_type";
    pub const LIST_TYPE: &str = "list_type";
    pub const ENUM: &str = "enum";
    pub const INVALID_REFERENCE: &str = "invalid_reference";
    pub const DATETIME_PARSING: &str = "datetime_parsing";
    pub const INT_PARSING: &str = "int_parsing";
    pub const LESS_THAN_EQUAL: &str = "less_than_or_equal";
}

/// A single field-level failure produced while shaping a document or
/// validating a request parameter. Serializes as one entry of the `errors`
/// array in a 422 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ShapeError {
    pub fn new(loc: Vec<String>, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    /// Prepend a location segment, used when an error bubbles out of a
    /// nested value (e.g. one element of a reference list).
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.loc.insert(0, segment.into());
        self
    }

    pub fn missing(field: &str) -> Self {
        Self::new(vec![field.to_string()], "Field required", kinds::MISSING)
    }

    pub fn string_type(field: &str) -> Self {
        Self::new(
            vec![field.to_string()],
            "Input should be a valid string",
            kinds::STRING_TYPE,
        )
    }

    pub fn bool_type(field: &str) -> Self {
        Self::new(
            vec![field.to_string()],
            "Input should be a valid boolean",
            kinds::BOOL_TYPE,
        )
    }

    pub fn list_type(field: &str) -> Self {
        Self::new(
            vec![field.to_string()],
            "Input should be a valid list",
            kinds::LIST_TYPE,
        )
    }

    pub fn invalid_enum(field: &str, allowed: &[&str]) -> Self {
        let rendered: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
        Self::new(
            vec![field.to_string()],
            format!("Input should be {}", rendered.join(", ")),
            kinds::ENUM,
        )
    }

    pub fn invalid_reference(value: &serde_json::Value) -> Self {
        Self::new(
            Vec::new(),
            format!("Invalid document reference: {}", value),
            kinds::INVALID_REFERENCE,
        )
    }

    pub fn datetime_parsing(field: &str) -> Self {
        Self::new(
            vec![field.to_string()],
            "Input should be a valid datetime",
            kinds::DATETIME_PARSING,
        )
    }

    pub fn int_parsing(loc: Vec<String>) -> Self {
        Self::new(loc, "Input should be a valid integer", kinds::INT_PARSING)
    }

    pub fn less_than_equal(loc: Vec<String>, max: u32) -> Self {
        Self::new(
            loc,
            format!("Input should be less than or equal to {}", max),
            kinds::LESS_THAN_EQUAL,
        )
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Document failed shaping into a response model
    Shaping(ShapeError),
    /// Request parameter failed validation
    Validation(ShapeError),
    /// Pagination cursor does not name an existing document
    InvalidCursor,
    /// Resource not found
    NotFound(String),
    /// Document store failure (transport, credentials, decoding)
    Store(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Shaping(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCursor => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the `detail` string for this error.
    pub fn detail(&self) -> String {
        match self {
            AppError::Shaping(_) => "Data Validation Error".to_string(),
            AppError::Validation(_) => "Validation Error".to_string(),
            AppError::InvalidCursor => "Invalid cursor".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Store(_) => "Internal Server Error".to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Shaping(e) | AppError::Validation(e) => {
                write!(f, "{}: {} ({})", self.detail(), e.msg, e.loc.join("."))
            }
            _ => write!(f, "{}", self.detail()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ShapeError> for AppError {
    fn from(err: ShapeError) -> Self {
        AppError::Shaping(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store error: {}", err);
        AppError::Store(err.to_string())
    }
}

/// Error response body: `{detail}`, with `errors` attached for 422s.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ShapeError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail();
        let errors = match self {
            AppError::Shaping(e) | AppError::Validation(e) => Some(vec![e]),
            _ => None,
        };
        (status, Json(ErrorResponse { detail, errors })).into_response()
    }
}
