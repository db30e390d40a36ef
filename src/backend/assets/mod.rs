//! Asset HTTP Module
//!
//! Wires the asset resolver into the HTTP layer and provides the PostgreSQL
//! implementations of its stores.
//!
//! - **`handlers`** - `POST /me`
//! - **`db`** - `PgUserStore` and `PgLedger`

/// Asset view handler
pub mod handlers;

/// PostgreSQL stores
pub mod db;

pub use db::{PgLedger, PgUserStore};
pub use handlers::get_my_assets;
