/**
 * Franchise Application Handlers
 *
 * - `POST /apply` - submit an application; requires a logged-in applicant
 *   (`kakaoId` and `nickname`), otherwise `401 Unauthorized`
 * - `GET /apply/list` - every application, newest first
 * - `GET /apply/status` - health check
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::assets::StoreError;
use crate::backend::apply::db;
use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::StatusResponse;
use crate::backend::server::state::AppState;
use crate::shared::{require_text, Application, ApplyRequest, ApplyResponse};

pub async fn submit_application(
    State(app_state): State<AppState>,
    body: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<Json<ApplyResponse>, BackendError> {
    let Json(mut request) = body?;
    let identity = require_text("kakaoId", request.kakao_id.take().as_deref())
        .and_then(|kakao_id| {
            require_text("nickname", request.nickname.take().as_deref()).map(|nickname| (kakao_id, nickname))
        });
    let (kakao_id, nickname) = identity.map_err(|e| {
        tracing::warn!("Rejected application without login: {}", e);
        BackendError::handler(StatusCode::UNAUTHORIZED, "login required")
    })?;

    let application = Application::from_request(request, kakao_id, nickname);

    if let Some(pool) = &app_state.db_pool {
        db::save_application(pool, &application)
            .await
            .map_err(StoreError::from)?;
    }

    tracing::info!("Application {} submitted by {}", application.id, application.nickname);
    app_state.applications.insert(application).await;

    Ok(Json(ApplyResponse {
        success: true,
        message: "application submitted".to_string(),
    }))
}

pub async fn list_applications(State(app_state): State<AppState>) -> Json<Vec<Application>> {
    Json(app_state.applications.list().await)
}

pub async fn apply_status() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}
