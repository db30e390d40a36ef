//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and prefix mounting
//! ├── chat_routes.rs  - Chat and presence routes
//! └── api_routes.rs   - Health, asset and application routes
//! ```
//!
//! # Route Types
//!
//! ## Chat Routes
//!
//! - `GET /chat` - list messages
//! - `POST /chat` - post a message
//! - `DELETE /chat/clear` - clear the log
//! - `POST /presence/join`, `DELETE /presence/leave`, `GET /presence/list`
//!
//! ## API Routes
//!
//! - `GET /status`, `GET /ping` - health check
//! - `POST /me` - asset snapshot
//! - `POST /apply`, `GET /apply/list`, `GET /apply/status`
//!
//! Every path is mounted under each prefix in `ORCAX_ROUTE_PREFIXES`
//! (default `/api`), so `/me` is served as `/api/me`.

/// Main router creation
pub mod router;

/// Chat and presence routes
pub mod chat_routes;

/// API routes
pub mod api_routes;

pub use router::create_router;
