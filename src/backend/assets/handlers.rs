/**
 * Asset View Handler
 *
 * `POST /me` resolves the caller's asset snapshot. The body identifies the
 * user by Kakao identifier and carries the current nickname, which becomes
 * the record's display name.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Deserialize;

use crate::assets::AssetResolver;
use crate::backend::error::BackendError;
use crate::shared::{require_text, AssetSnapshot};

/// Request body for `POST /me`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeRequest {
    #[serde(default)]
    pub kakao_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Resolve the asset snapshot of the requesting user
///
/// Returns `400 Bad Request` when the body is missing or unreadable, or when
/// `kakaoId` or `nickname` is missing or blank, before the resolver is involved.
pub async fn get_my_assets(
    State(resolver): State<Arc<AssetResolver>>,
    body: Result<Json<MeRequest>, JsonRejection>,
) -> Result<Json<AssetSnapshot>, BackendError> {
    let Json(request) = body?;
    let kakao_id = require_text("kakaoId", request.kakao_id.as_deref())?;
    let nickname = require_text("nickname", request.nickname.as_deref())?;

    let resolution = resolver.resolve_detailed(&kakao_id, &nickname).await?;
    if !resolution.degraded.is_empty() {
        tracing::info!(
            "Served snapshot for {} with {} degraded ledger(s)",
            kakao_id,
            resolution.degraded.len()
        );
    }

    Ok(Json(resolution.snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryUserStore;
    use crate::shared::ResolverConfig;
    use axum::http::StatusCode;

    fn resolver() -> Arc<AssetResolver> {
        Arc::new(AssetResolver::new(
            Arc::new(MemoryUserStore::new()),
            ResolverConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_missing_nickname_is_bad_request() {
        let request = MeRequest {
            kakao_id: Some("k1".to_string()),
            nickname: None,
        };
        let err = get_my_assets(State(resolver()), Ok(Json(request))).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_returns_snapshot_for_display_name() {
        let request = MeRequest {
            kakao_id: Some("k1".to_string()),
            nickname: Some("Alice".to_string()),
        };
        let Json(snapshot) = get_my_assets(State(resolver()), Ok(Json(request))).await.unwrap();
        assert_eq!(snapshot.display_name, "Alice");
        assert_eq!(snapshot.token, 0.0);
    }
}
