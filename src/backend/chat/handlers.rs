/**
 * Chat Handlers
 *
 * HTTP endpoints of the chat log:
 *
 * - `GET /chat` - messages in timestamp order
 * - `POST /chat` - post a message
 * - `DELETE /chat/clear` - remove every message
 *
 * Posting marks the author as present. When a database is configured,
 * posts and clears are written through to it; a failed write is logged and
 * the in-memory log still serves the request.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::chat::db;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{require_text, ChatMessage};

/// Request body for posting a message
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    #[serde(default)]
    pub kakao_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

pub async fn list_messages(State(app_state): State<AppState>) -> Json<Vec<ChatMessage>> {
    let chat_state = app_state.chat_state.read().await;
    Json(chat_state.messages().to_vec())
}

pub async fn post_message(
    State(app_state): State<AppState>,
    body: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, BackendError> {
    let Json(request) = body?;
    let nickname = require_text("nickname", request.nickname.as_deref())?;
    let text = require_text("message", request.message.as_deref())?;
    let kakao_id = request
        .kakao_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let message = ChatMessage::new(kakao_id, nickname, text);

    let dropped = app_state.chat_state.write().await.add_message(message.clone());
    if dropped > 0 {
        tracing::info!("Chat log full, dropped {} oldest messages", dropped);
    }
    app_state.presence.touch(&message.nickname).await;

    if let Some(pool) = &app_state.db_pool {
        if let Err(e) = db::save_message(pool, &message).await {
            tracing::error!("Failed to persist chat message: {:?}", e);
        }
    }

    tracing::debug!("{} posted a message", message.nickname);
    Ok(Json(OkResponse { ok: true }))
}

pub async fn clear_messages(State(app_state): State<AppState>) -> Json<OkResponse> {
    app_state.chat_state.write().await.clear();

    if let Some(pool) = &app_state.db_pool {
        match db::clear_messages(pool).await {
            Ok(deleted) => tracing::info!("Deleted {} persisted chat messages", deleted),
            Err(e) => tracing::error!("Failed to clear persisted chat messages: {:?}", e),
        }
    }

    tracing::info!("Chat log cleared");
    Json(OkResponse { ok: true })
}
