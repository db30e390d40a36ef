/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The asset resolver and its stores
 * - Chat log
 * - Presence registry
 * - Franchise applications
 * - Optional services (database)
 *
 * # Thread Safety
 *
 * All state is designed to be thread-safe:
 * - `Arc<RwLock<ChatState>>` for concurrent chat state access
 * - `PresenceRegistry` and `ApplicationBook` share their data through `Arc`
 * - `Option<T>` for optional services that may not be configured
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::assets::AssetResolver;
use crate::backend::apply::ApplicationBook;
use crate::backend::chat::state::ChatState;
use crate::backend::presence::PresenceRegistry;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Resolver behind `POST /me`
    pub resolver: Arc<AssetResolver>,

    /// Shared chat log
    ///
    /// This is wrapped in `Arc<RwLock<>>` to allow concurrent read access
    /// from multiple handlers while ensuring exclusive write access.
    pub chat_state: Arc<RwLock<ChatState>>,

    /// Nicknames currently in the chat
    pub presence: PresenceRegistry,

    /// Submitted franchise applications
    pub applications: ApplicationBook,

    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if
    /// `DATABASE_URL` environment variable is not set). Handlers should
    /// check for `None` before using the database.
    pub db_pool: Option<PgPool>,

    pub config: Arc<ServerConfig>,
}

impl FromRef<AppState> for Arc<AssetResolver> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.resolver.clone()
    }
}

impl FromRef<AppState> for Arc<RwLock<ChatState>> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chat_state.clone()
    }
}

impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

impl FromRef<AppState> for ApplicationBook {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.applications.clone()
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
