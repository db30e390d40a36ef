//! Presence Module
//!
//! Who is currently in the chat.
//!
//! ```text
//! presence/
//! ├── mod.rs       - Module exports
//! ├── registry.rs  - PresenceRegistry
//! └── handlers.rs  - join / leave / list endpoints
//! ```

/// Presence registry
pub mod registry;

/// Presence HTTP handlers
pub mod handlers;

pub use handlers::JoinersResponse;
pub use registry::PresenceRegistry;
