//! Error handling module for the survey backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Per-slot validation messages, keyed by slot name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTEGRITY_ERROR: &str = "INTEGRITY_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// One or more slots failed validation
    Validation(FieldErrors),
    /// Stored value would not fit its column
    Integrity(String),
    /// Database error
    Database(String),
    /// Bad request
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Integrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Integrity(_) => codes::INTEGRITY_ERROR,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(fields) => {
                format!("{} field(s) failed validation", fields.len())
            }
            AppError::Integrity(msg) => msg.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::Validation(fields) => Some(serde_json::json!({ "fields": fields })),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}

/// Inconsistent survey definition, detected while the schema is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    DuplicateSlot(String),
    EmptyChoices(String),
    DuplicateCode { slot: String, code: String },
    /// Empty code, or one containing the storage separator
    InvalidCode { slot: String, code: String },
    InsufficientWidth {
        slot: String,
        declared: usize,
        required: usize,
    },
    MissingOtherText { slot: String, other_text: String },
    UnknownExportColumn(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::DuplicateSlot(name) => write!(f, "slot {} is declared twice", name),
            SchemaError::EmptyChoices(name) => write!(f, "slot {} has no choices", name),
            SchemaError::DuplicateCode { slot, code } => {
                write!(f, "slot {} declares code {:?} twice", slot, code)
            }
            SchemaError::InvalidCode { slot, code } => {
                write!(f, "slot {} has invalid code {:?}", slot, code)
            }
            SchemaError::InsufficientWidth {
                slot,
                declared,
                required,
            } => write!(
                f,
                "slot {} is {} characters wide but needs {} to hold every choice",
                slot, declared, required
            ),
            SchemaError::MissingOtherText { slot, other_text } => write!(
                f,
                "slot {} refers to {} for its write-in, which is not a free text slot",
                slot, other_text
            ),
            SchemaError::UnknownExportColumn(name) => {
                write!(f, "export column {} does not name a slot", name)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Failure of an export run. Every variant aborts the whole batch.
#[derive(Debug)]
pub enum ExportError {
    /// Template missing, unreadable, or too short
    Template { path: PathBuf, message: String },
    /// A column could not be resolved for a record
    Resolution {
        record_id: i64,
        column: String,
        message: String,
    },
    Database(String),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Template { path, message } => {
                write!(f, "template {}: {}", path.display(), message)
            }
            ExportError::Resolution {
                record_id,
                column,
                message,
            } => write!(
                f,
                "cannot resolve column {} of record {}: {}",
                column, record_id, message
            ),
            ExportError::Database(msg) => write!(f, "{}", msg),
            ExportError::Io(err) => write!(f, "I/O error: {}", err),
            ExportError::Csv(err) => write!(f, "CSV error: {}", err),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<AppError> for ExportError {
    fn from(err: AppError) -> Self {
        ExportError::Database(err.message())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err)
    }
}

/// Invalid configuration value.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_envelope_carries_fields() {
        let mut fields = FieldErrors::new();
        fields.insert("q4".to_string(), vec!["Enter a list of values.".to_string()]);
        let error = AppError::Validation(fields);

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        let body = serde_json::to_value(ErrorResponse::new(&error)).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["details"]["fields"]["q4"][0],
            "Enter a list of values."
        );
    }

    #[test]
    fn test_integrity_has_no_details() {
        let error = AppError::Integrity("too wide".to_string());
        let body = serde_json::to_value(ErrorResponse::new(&error)).unwrap();
        assert_eq!(body["error"]["code"], "INTEGRITY_ERROR");
        assert!(body["error"].get("details").is_none());
    }
}
