//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - Error type definitions and status mapping
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::http::StatusCode;
//! use axum::Json;
//! use orcax::backend::error::BackendError;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::handler(StatusCode::UNAUTHORIZED, "login required"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
