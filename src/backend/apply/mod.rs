//! Franchise Application Module
//!
//! ```text
//! apply/
//! ├── mod.rs       - Module exports
//! ├── book.rs      - In-memory ApplicationBook
//! ├── handlers.rs  - submit / list / status endpoints
//! └── db.rs        - PostgreSQL persistence
//! ```

/// Application storage
pub mod book;

/// Application HTTP handlers
pub mod handlers;

/// Database operations for applications
pub mod db;

pub use book::ApplicationBook;
