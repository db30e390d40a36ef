//! OrcaX - Backend Library
//!
//! Backend of the OrcaX farming game site. The centerpiece is the asset view:
//! given a user identifier and display name it returns a normalized snapshot
//! of the user's resources, built from a primary user record and several
//! auxiliary ledgers that may be slow, missing or hold data from older
//! clients.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared across layers
//!   - Asset snapshot, chat message and application types
//!   - Resolver configuration
//!   - Error types
//!
//! - **`assets`** - The asset view
//!   - Store traits and in-memory stores
//!   - Field precedence and numeric coercion
//!   - `AssetResolver`
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and handlers
//!   - Chat log, presence and franchise applications
//!   - PostgreSQL persistence
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the server binary
//!
//! # Error Handling
//!
//! - `ResolveError` for asset resolution (`InvalidInput`, `StoreFailure`)
//! - `StoreError` for store implementations
//! - `SharedError` for input validation
//! - `BackendError` for HTTP responses

pub mod shared;

pub mod assets;

#[cfg(feature = "ssr")]
pub mod backend;
