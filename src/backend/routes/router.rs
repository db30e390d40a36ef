/**
 * Main Router Creation
 *
 * Assembles the API router and mounts it under every configured prefix.
 * A prefix of `/` merges the routes at the root instead of nesting them.
 *
 * # Middleware
 *
 * - `TraceLayer` - request/response tracing
 * - `CorsLayer::permissive()` - any origin may call the API
 */

use axum::{http::StatusCode, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the main application router
///
/// # Arguments
///
/// * `app_state` - The application state to share with handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let api = configure_chat_routes(configure_api_routes(Router::new()));

    let mut router = Router::new();
    for prefix in &app_state.config.route_prefixes {
        tracing::info!("Mounting API under {}", prefix);
        router = if prefix == "/" {
            router.merge(api.clone())
        } else {
            router.nest(prefix, api.clone())
        };
    }

    router
        .fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "Not Found") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
