//! # Error Types
//!
//! Structured error types for takeoff_core.
//!
//! Only *structural* problems become errors: a room record missing a required
//! field, a file that cannot be read, a workbook that cannot be written.
//! Numeric anomalies in room data (negative dimensions, negative opening
//! counts, an unknown finish type) are normalized by the engine and never
//! reach this module.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{CalcError, CalcResult};
//!
//! fn validate_coverage(sqft_per_unit: f64) -> CalcResult<()> {
//!     if sqft_per_unit <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "coverage",
//!             sqft_per_unit.to_string(),
//!             "Coverage must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for takeoff operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (configuration out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Spreadsheet export failed
    #[error("Export failed: {target} - {reason}")]
    ExportError { target: String, reason: String },

    /// Document rendering failed (PDF compilation)
    #[error("Render failed: {reason}")]
    RenderError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an ExportError
    pub fn export_error(target: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ExportError {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Map a serde_json error, promoting "missing field" to [`CalcError::MissingField`].
    ///
    /// serde reports a missing key as ``missing field `length` at line 3 column 5``;
    /// callers get the field name back as structured data.
    pub fn from_json(err: &serde_json::Error) -> Self {
        let message = err.to_string();
        if let Some(rest) = message.strip_prefix("missing field `") {
            if let Some(end) = rest.find('`') {
                return CalcError::missing_field(&rest[..end]);
            }
        }
        CalcError::SerializationError { reason: message }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ExportError { .. } => "EXPORT_ERROR",
            CalcError::RenderError { .. } => "RENDER_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("coverage", "-400", "Coverage must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("length").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::export_error("bid.xlsx", "disk full").error_code(), "EXPORT_ERROR");
    }

    #[test]
    fn test_missing_field_is_promoted() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Probe {
            length: f64,
        }

        let err = serde_json::from_str::<Probe>("{}").unwrap_err();
        assert_eq!(CalcError::from_json(&err), CalcError::missing_field("length"));

        let err = serde_json::from_str::<Probe>("{\"length\": \"tall\"}").unwrap_err();
        assert_eq!(CalcError::from_json(&err).error_code(), "SERIALIZATION_ERROR");
    }
}
