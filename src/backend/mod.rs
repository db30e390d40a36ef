//! Backend Module
//!
//! This module contains all server-side code for the OrcaX backend.
//! It provides an Axum HTTP server exposing the asset view, the chat log,
//! presence and franchise applications.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`assets`** - `POST /me` and the PostgreSQL asset stores
//! - **`chat`** - Chat log handlers, state and persistence
//! - **`presence`** - Who is currently in the chat
//! - **`apply`** - Franchise applications
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── assets/         - Asset view handler and PostgreSQL stores
//! ├── chat/           - Chat handlers and state
//! ├── presence/       - Presence registry
//! ├── apply/          - Franchise applications
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) that contains:
//! - The asset resolver with its user store and ledgers
//! - Chat log (`Arc<RwLock<ChatState>>`)
//! - Presence registry and application book
//! - Optional services (database)
//!
//! Without `DATABASE_URL` every store is in memory, which is also how the
//! integration tests run the server.
//!
//! # Error Handling
//!
//! Handlers return `Result<Json<T>, BackendError>`; `BackendError` maps
//! validation failures to `400`, missing login to `401` and store failures
//! to `500`, always as a JSON body.

pub mod server;

pub mod routes;

pub mod assets;

pub mod chat;

pub mod presence;

pub mod apply;

pub mod error;

pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
