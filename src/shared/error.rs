//! Shared Error Types
//!
//! This module defines error types shared by the asset resolver and the HTTP
//! backend. They represent input failures that can occur in either layer.
//!
//! # Error Categories
//!
//! - `ValidationError` - A required field is missing or malformed
//!
//! # Usage
//!
//! ```rust
//! use orcax::shared::SharedError;
//!
//! let error = SharedError::validation("nickname", "nickname is required");
//! assert!(error.to_string().contains("nickname"));
//! ```
use thiserror::Error;

/// Error types that can occur in both the resolver and the backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Trim a required text input, rejecting it when nothing is left
///
/// Used by every entry point that takes a nickname or identifier, so blank
/// and whitespace-only values are treated the same as missing ones.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, SharedError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(SharedError::validation(field, format!("{} is required", field))),
    }
}
