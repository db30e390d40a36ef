//! Shared Module
//!
//! This module contains the data types exchanged between the asset resolver,
//! the HTTP backend and the board's clients. All types are designed for JSON
//! serialization and carry the camelCase keys the clients use.

/// Chat message data structure
pub mod message;

/// Resolved asset snapshot
pub mod snapshot;

/// Franchise application types
pub mod application;

/// Shared error types
pub mod error;

/// Resolver configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::ChatMessage;
pub use snapshot::AssetSnapshot;
pub use application::{Application, ApplyRequest, ApplyResponse};
pub use error::{require_text, SharedError};
pub use config::{AssetDefaults, ConfigError, ResolverConfig, ResolverConfigBuilder};
