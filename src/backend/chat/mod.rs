//! Chat Backend Module
//!
//! This module contains all server-side chat functionality, including:
//! - Chat log management (bounded, timestamp-ordered)
//! - HTTP handlers for listing, posting and clearing
//! - Database operations for message persistence
//!
//! The chat log is stored in memory and persisted to database when available.
//!
//! # Example
//!
//! ```rust
//! use orcax::backend::chat::state::ChatState;
//! use orcax::shared::ChatMessage;
//!
//! let mut state = ChatState::default();
//! state.add_message(ChatMessage::new(None, "Alice".to_string(), "Hello!".to_string()));
//! assert_eq!(state.len(), 1);
//! ```

/// Chat log state
pub mod state;

/// Chat HTTP handlers
pub mod handlers;

/// Database operations for chat messages
pub mod db;

pub use handlers::OkResponse;
pub use state::ChatState;
