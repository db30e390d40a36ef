//! HTTP API integration tests
//!
//! Drive the router over in-memory stores with `axum-test`.

#[macro_use]
mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{config_with_defaults, test_config, TestApp};
use orcax::backend::chat::state::{MAX_MESSAGES, TRIM_TO};
use orcax::backend::chat::OkResponse;
use orcax::backend::presence::JoinersResponse;
use orcax::backend::server::ServerConfig;
use orcax::shared::{AssetDefaults, AssetSnapshot, ChatMessage};

#[tokio::test]
async fn test_status_and_ping() {
    let app = TestApp::new();

    for path in ["/api/status", "/api/ping", "/api/apply/status"] {
        let response = app.server.get(path).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "OK" }));
    }
}

#[tokio::test]
async fn test_me_creates_user_with_defaults() {
    let app = TestApp::with_config(config_with_defaults(AssetDefaults {
        water: 10.0,
        fertilizer: 3.0,
        ..AssetDefaults::default()
    }));

    let response = app
        .server
        .post("/api/me")
        .json(&json!({ "kakaoId": "k-100", "nickname": "Alice" }))
        .await;

    response.assert_status_ok();
    let snapshot: AssetSnapshot = response.json();
    assert_eq!(snapshot.display_name, "Alice");
    assert_approx_eq!(snapshot.water, 10.0);
    assert_approx_eq!(snapshot.fertilizer, 3.0);
    assert_approx_eq!(snapshot.seed_potato, 0.0);
    assert_eq!(app.stores.users.len().await, 1);
}

#[tokio::test]
async fn test_me_response_uses_camel_case_keys() {
    let app = TestApp::new();

    let body: Value = app
        .server
        .post("/api/me")
        .json(&json!({ "kakaoId": "k-1", "nickname": "Bob" }))
        .await
        .json();

    let mut keys: Vec<&str> = body
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["barley", "displayName", "fertilizer", "potato", "seedBarley", "seedPotato", "token", "water"]
    );
}

#[tokio::test]
async fn test_me_combines_record_and_ledgers() {
    let app = TestApp::with_config(config_with_defaults(AssetDefaults {
        water: 3.0,
        ..AssetDefaults::default()
    }));
    app.stores.farm_usage.append("k-7", json!({ "waterUsed": 10 })).await;
    app.stores.harvest.append("k-7", json!({ "token": 4, "potato": 2 })).await;
    app.stores.inventory.append("k-7", json!({ "seedPotato": 6, "seedBarley": 1 })).await;

    let snapshot: AssetSnapshot = app
        .server
        .post("/api/me")
        .json(&json!({ "kakaoId": "k-7", "nickname": "Carol" }))
        .await
        .json();

    assert_approx_eq!(snapshot.water, 0.0);
    assert_approx_eq!(snapshot.token, 4.0);
    assert_approx_eq!(snapshot.potato, 2.0);
    assert_approx_eq!(snapshot.seed_potato, 6.0);
    assert_approx_eq!(snapshot.seed_barley, 1.0);
    assert_well_formed!(snapshot);
}

#[tokio::test]
async fn test_me_rejects_missing_identity() {
    let app = TestApp::new();

    for body in [
        json!({ "nickname": "Alice" }),
        json!({ "kakaoId": "k-1" }),
        json!({ "kakaoId": "  ", "nickname": "Alice" }),
    ] {
        let response = app.server.post("/api/me").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["status"], json!(400));
    }

    assert!(app.stores.users.is_empty().await);
}

#[tokio::test]
async fn test_me_rejects_unreadable_body_as_json() {
    let app = TestApp::new();

    let wrong_type = app
        .server
        .post("/api/me")
        .json(&json!({ "kakaoId": 123, "nickname": "A" }))
        .await;
    let no_body = app.server.post("/api/me").await;

    for response in [wrong_type, no_body] {
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["status"], json!(400));
        assert!(error["error"].is_string());
    }

    assert!(app.stores.users.is_empty().await);
}

#[tokio::test]
async fn test_chat_and_apply_reject_unreadable_body_as_json() {
    let app = TestApp::new();

    for path in ["/api/chat", "/api/apply"] {
        let response = app.server.post(path).text("not json").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["status"], json!(400));
    }
}

#[tokio::test]
async fn test_chat_post_and_list() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/chat")
        .json(&json!({ "kakaoId": "k-1", "nickname": "Alice", "message": "hello" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<OkResponse>(), OkResponse { ok: true });

    app.server
        .post("/api/chat/send")
        .json(&json!({ "nickname": "Bob", "message": "hi" }))
        .await
        .assert_status_ok();

    let messages: Vec<ChatMessage> = app.server.get("/api/chat/list").await.json();
    let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, vec!["hello", "hi"]);
    assert_eq!(messages[0].kakao_id.as_deref(), Some("k-1"));
    assert_eq!(messages[1].kakao_id, None);
}

#[tokio::test]
async fn test_chat_requires_nickname_and_message() {
    let app = TestApp::new();

    app.server
        .post("/api/chat")
        .json(&json!({ "nickname": "Alice" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .post("/api/chat")
        .json(&json!({ "message": "hello" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let messages: Vec<ChatMessage> = app.server.get("/api/chat").await.json();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_chat_log_trims_after_overflow() {
    let app = TestApp::new();

    for n in 0..=MAX_MESSAGES {
        app.server
            .post("/api/chat")
            .json(&json!({ "nickname": "Alice", "message": format!("m{}", n) }))
            .await
            .assert_status_ok();
    }

    let messages: Vec<ChatMessage> = app.server.get("/api/chat").await.json();
    assert_eq!(messages.len(), TRIM_TO);
    assert_eq!(messages.last().map(|m| m.message.as_str()), Some("m200"));
}

#[tokio::test]
async fn test_chat_clear_with_delete_and_post() {
    let app = TestApp::new();

    for clear in ["delete", "post"] {
        app.server
            .post("/api/chat")
            .json(&json!({ "nickname": "Alice", "message": "hello" }))
            .await
            .assert_status_ok();

        let response = match clear {
            "delete" => app.server.delete("/api/chat/clear").await,
            _ => app.server.post("/api/chat/clear").await,
        };
        response.assert_status_ok();

        let messages: Vec<ChatMessage> = app.server.get("/api/chat").await.json();
        assert!(messages.is_empty());
    }
}

#[tokio::test]
async fn test_presence_join_leave_and_list() {
    let app = TestApp::new();

    let joined: JoinersResponse = app
        .server
        .post("/api/presence/join")
        .json(&json!({ "nickname": "bob" }))
        .await
        .json();
    assert_eq!(joined.ok, Some(true));
    assert_eq!(joined.joiners, vec!["bob"]);

    app.server
        .post("/api/chat/join")
        .json(&json!({ "nickname": "alice" }))
        .await
        .assert_status_ok();

    let listed: JoinersResponse = app.server.get("/api/chat/joiners").await.json();
    assert_eq!(listed.joiners, vec!["alice", "bob"]);

    let left: JoinersResponse = app
        .server
        .delete("/api/presence/leave")
        .json(&json!({ "nickname": "bob" }))
        .await
        .json();
    assert_eq!(left.joiners, vec!["alice"]);

    app.server
        .post("/api/chat/leave")
        .json(&json!({ "nickname": "alice" }))
        .await
        .assert_status_ok();

    let listed: JoinersResponse = app.server.get("/api/presence/list").await.json();
    assert!(listed.joiners.is_empty());
    assert_eq!(listed.ok, None);
}

#[tokio::test]
async fn test_presence_accepts_missing_body() {
    let app = TestApp::new();
    app.state.presence.join("bob").await;

    let left: JoinersResponse = app.server.delete("/api/presence/leave").await.json();
    assert_eq!(left.ok, Some(true));
    assert_eq!(left.joiners, vec!["bob"]);

    let joined = app.server.post("/api/presence/join").await;
    joined.assert_status_ok();
    assert_eq!(joined.json::<JoinersResponse>().joiners, vec!["bob"]);

    let malformed = app
        .server
        .post("/api/presence/join")
        .json(&json!({ "nickname": 7 }))
        .await;
    malformed.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(malformed.json::<Value>()["status"], json!(400));
}

#[tokio::test]
async fn test_posting_marks_author_present() {
    let app = TestApp::new();

    app.server
        .post("/api/chat")
        .json(&json!({ "nickname": "dana", "message": "hey" }))
        .await
        .assert_status_ok();

    let listed: JoinersResponse = app.server.get("/api/presence/list").await.json();
    assert_eq!(listed.joiners, vec!["dana"]);
}

#[tokio::test]
async fn test_apply_requires_login() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/apply")
        .json(&json!({ "owner": "Kim", "phone": "010-0000-0000", "nickname": "kim" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let error: Value = response.json();
    assert_eq!(error["error"], json!("login required"));
    assert!(app.state.applications.is_empty().await);
}

#[tokio::test]
async fn test_apply_submit_and_list() {
    let app = TestApp::new();

    for (kakao_id, owner) in [("k-1", "Kim"), ("k-2", "Lee")] {
        let response = app
            .server
            .post("/api/apply")
            .json(&json!({
                "owner": owner,
                "region": "Seoul",
                "kakaoId": kakao_id,
                "nickname": owner.to_lowercase(),
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
    }

    let listed: Vec<Value> = app.server.get("/api/apply/list").await.json();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["kakaoId"], json!("k-2"));
    assert_eq!(listed[1]["owner"], json!("Kim"));
}

#[tokio::test]
async fn test_routes_mounted_under_every_prefix() {
    let app = TestApp::with_config(ServerConfig {
        route_prefixes: vec!["/api".to_string(), "/orcax".to_string(), "/".to_string()],
        ..test_config()
    });

    for path in ["/api/status", "/orcax/status", "/status"] {
        app.server.get(path).await.assert_status_ok();
    }

    // prefixes share one state
    app.server
        .post("/orcax/chat")
        .json(&json!({ "nickname": "Alice", "message": "hello" }))
        .await
        .assert_status_ok();
    let messages: Vec<ChatMessage> = app.server.get("/chat").await.json();
    assert_eq!(messages.len(), 1);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/api/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let error: Value = response.json();
    assert_eq!(error["status"], json!(404));
}
