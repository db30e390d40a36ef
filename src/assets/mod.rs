//! Asset Module
//!
//! The user-asset view: everything needed to turn a user identifier and
//! display name into a normalized [`AssetSnapshot`](crate::shared::AssetSnapshot).
//!
//! # Architecture
//!
//! - **`store`** - `UserStore` / `LedgerStore` traits, records and errors
//! - **`fields`** - per-field source precedence and numeric coercion
//! - **`projection`** - pure snapshot computation
//! - **`resolver`** - `AssetResolver`, orchestrating stores and projection
//! - **`memory`** - in-memory store implementations
//!
//! # Module Structure
//!
//! ```text
//! assets/
//! ├── mod.rs         - Module exports and documentation
//! ├── store.rs       - Store traits and record types
//! ├── fields.rs      - Precedence table and coercion
//! ├── projection.rs  - Snapshot projection
//! ├── resolver.rs    - Asset resolver
//! └── memory.rs      - In-memory stores
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use orcax::assets::{AssetResolver, MemoryUserStore};
//! use orcax::shared::ResolverConfig;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let resolver = AssetResolver::new(Arc::new(MemoryUserStore::new()), ResolverConfig::default());
//! let snapshot = resolver.resolve("kakao-1", "Alice").await.unwrap();
//! assert_eq!(snapshot.water, 0.0);
//! # }
//! ```

/// Store traits and record types
pub mod store;

/// Field precedence and coercion
pub mod fields;

/// Snapshot projection
pub mod projection;

/// Asset resolver
pub mod resolver;

/// In-memory stores
pub mod memory;

pub use memory::{MemoryLedger, MemoryUserStore};
pub use projection::{project_assets, LedgerReading};
pub use resolver::{AssetResolver, FailureReason, Resolution, ResolveError, SourceFailure};
pub use store::{aggregate, LedgerEntry, LedgerKind, LedgerStore, LedgerTotals, StoreError, UserRecord, UserStore};
