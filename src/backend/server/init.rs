/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool
 * 2. Pick stores: PostgreSQL when the pool exists, in-memory otherwise
 * 3. Restore chat log and applications from the database if available
 * 4. Start the presence pruning task
 * 5. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::assets::{AssetResolver, LedgerKind, MemoryLedger, MemoryUserStore};
use crate::backend::apply::ApplicationBook;
use crate::backend::assets::{PgLedger, PgUserStore};
use crate::backend::chat::state::ChatState;
use crate::backend::presence::PresenceRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Handles to the in-memory stores behind a memory-backed [`AppState`]
///
/// Lets tests and local tooling seed records and ledger entries.
#[derive(Clone)]
pub struct MemoryStores {
    pub users: Arc<MemoryUserStore>,
    pub farm_usage: Arc<MemoryLedger>,
    pub harvest: Arc<MemoryLedger>,
    pub inventory: Arc<MemoryLedger>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            farm_usage: Arc::new(MemoryLedger::new("farm_usage", LedgerKind::FarmUsage)),
            harvest: Arc::new(MemoryLedger::new("harvest_log", LedgerKind::Harvest)),
            inventory: Arc::new(MemoryLedger::new("inventory_snapshots", LedgerKind::Inventory)),
        }
    }

    fn resolver(&self, config: &ServerConfig) -> AssetResolver {
        AssetResolver::new(self.users.clone(), config.resolver.clone())
            .with_ledger(self.farm_usage.clone())
            .with_ledger(self.harvest.clone())
            .with_ledger(self.inventory.clone())
    }
}

impl Default for MemoryStores {
    fn default() -> Self {
        Self::new()
    }
}

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: Server runs on in-memory stores
/// - Migration failures: Logged but don't prevent startup
/// - State restoration failures: Logged but don't prevent startup
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing OrcaX backend server");

    let db_pool = load_database().await;
    let app_state = match db_pool {
        Some(pool) => database_state(config, pool).await,
        None => memory_state(config).0,
    };

    spawn_presence_pruning(&app_state.presence);

    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}

/// Application state backed entirely by in-memory stores
pub fn memory_state(config: ServerConfig) -> (AppState, MemoryStores) {
    let stores = MemoryStores::new();
    let resolver = stores.resolver(&config);

    let app_state = AppState {
        resolver: Arc::new(resolver),
        chat_state: Arc::new(RwLock::new(ChatState::new())),
        presence: PresenceRegistry::new(config.presence_window),
        applications: ApplicationBook::new(),
        db_pool: None,
        config: Arc::new(config),
    };

    (app_state, stores)
}

/// Application state backed by PostgreSQL
pub async fn database_state(config: ServerConfig, pool: PgPool) -> AppState {
    let resolver = PgLedger::all(&pool).into_iter().fold(
        AssetResolver::new(Arc::new(PgUserStore::new(pool.clone())), config.resolver.clone()),
        |resolver, ledger| resolver.with_ledger(Arc::new(ledger)),
    );
    tracing::info!("Asset resolver using {} PostgreSQL ledgers", resolver.ledger_count());

    let chat_state = Arc::new(RwLock::new(ChatState::new()));
    restore_chat_state(&pool, &chat_state).await;

    let applications = ApplicationBook::new();
    restore_applications(&pool, &applications).await;

    AppState {
        resolver: Arc::new(resolver),
        chat_state,
        presence: PresenceRegistry::new(config.presence_window),
        applications,
        db_pool: Some(pool),
        config: Arc::new(config),
    }
}

/// Restore the chat log from the database
///
/// Errors are logged but don't prevent server startup. If restoration fails,
/// the server starts with an empty chat log.
async fn restore_chat_state(pool: &PgPool, chat_state: &Arc<RwLock<ChatState>>) {
    use crate::backend::chat::db::load_messages;

    tracing::info!("Loading chat messages from database...");

    match load_messages(pool).await {
        Ok(messages) => {
            tracing::info!("Loaded {} messages from database", messages.len());
            *chat_state.write().await = ChatState::from_messages(messages);
        }
        Err(e) => {
            tracing::warn!("Failed to load messages from database (tables may not exist yet): {:?}", e);
            tracing::warn!("Starting with empty chat log");
        }
    }
}

async fn restore_applications(pool: &PgPool, applications: &ApplicationBook) {
    use crate::backend::apply::db::load_applications;

    match load_applications(pool).await {
        Ok(loaded) => {
            tracing::info!("Loaded {} applications from database", loaded.len());
            applications.restore(loaded).await;
        }
        Err(e) => {
            tracing::warn!("Failed to load applications from database: {:?}", e);
        }
    }
}

/// Periodically drop idle joiners so the registry does not grow unbounded
fn spawn_presence_pruning(presence: &PresenceRegistry) {
    let Some(window) = presence.window() else {
        return;
    };

    let presence = presence.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(window);
        loop {
            interval.tick().await;
            let pruned = presence.prune().await;
            if pruned > 0 {
                tracing::debug!("Pruned {} idle joiners", pruned);
            }
        }
    });
}
