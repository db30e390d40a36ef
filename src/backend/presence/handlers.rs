/**
 * Presence Handlers
 *
 * Join, leave and list endpoints. Every response carries the current joiner
 * list so clients can refresh their view without a second request.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::presence::registry::PresenceRegistry;

/// Request body for join and leave
#[derive(Debug, Default, Deserialize)]
pub struct PresenceRequest {
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Current joiner list
///
/// `ok` is only set on join and leave acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinersResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    pub joiners: Vec<String>,
}

/// Nickname from an optional body
///
/// A request without a JSON body reads as an empty one; a body that is
/// present but unreadable is rejected.
fn requested_nickname(body: Result<Json<PresenceRequest>, JsonRejection>) -> Result<String, BackendError> {
    match body {
        Ok(Json(request)) => Ok(request.nickname.unwrap_or_default()),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(String::new()),
        Err(rejection) => Err(rejection.into()),
    }
}

pub async fn join(
    State(registry): State<PresenceRegistry>,
    body: Result<Json<PresenceRequest>, JsonRejection>,
) -> Result<Json<JoinersResponse>, BackendError> {
    let nickname = requested_nickname(body)?;
    tracing::debug!("Join request from {:?}", nickname);
    let joiners = registry.join(&nickname).await;
    Ok(Json(JoinersResponse {
        ok: Some(true),
        joiners,
    }))
}

pub async fn leave(
    State(registry): State<PresenceRegistry>,
    body: Result<Json<PresenceRequest>, JsonRejection>,
) -> Result<Json<JoinersResponse>, BackendError> {
    let nickname = requested_nickname(body)?;
    let joiners = registry.leave(&nickname).await;
    Ok(Json(JoinersResponse {
        ok: Some(true),
        joiners,
    }))
}

pub async fn list(State(registry): State<PresenceRegistry>) -> Json<JoinersResponse> {
    Json(JoinersResponse {
        ok: None,
        joiners: registry.list().await,
    })
}
