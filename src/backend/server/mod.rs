//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading and validation
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (environment, database)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env` and the optional database
//! 2. **State Creation**: resolver, chat log, presence registry, applications
//! 3. **State Restoration**: chat log and applications from the database if available
//! 4. **Router Creation**: routes mounted under every configured prefix
//!
//! # Example
//!
//! ```rust,no_run
//! use orcax::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() {
//! let config = ServerConfig::from_env().unwrap();
//! let app = create_app(config).await;
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::{create_app, memory_state, MemoryStores};
pub use state::AppState;
