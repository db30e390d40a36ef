/**
 * API Route Configuration
 *
 * Health, asset and franchise application endpoints. Paths are relative;
 * the router mounts them under every configured prefix.
 */

use axum::{response::Json, routing::get, routing::post, Router};
use serde::{Deserialize, Serialize};

use crate::backend::apply::handlers::{apply_status, list_applications, submit_application};
use crate::backend::assets::get_my_assets;
use crate::backend::server::state::AppState;

/// Health check body, `{"status":"OK"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Configure API routes
///
/// Adds:
/// - `GET /status`, `GET /ping` - health check
/// - `POST /me` - asset snapshot of the caller
/// - `POST /apply` - submit a franchise application
/// - `GET /apply/list` - list applications
/// - `GET /apply/status` - health check
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/status", get(status))
        .route("/ping", get(status))
        .route("/me", post(get_my_assets))
        .route("/apply", post(submit_application))
        .route("/apply/list", get(list_applications))
        .route("/apply/status", get(apply_status))
}
