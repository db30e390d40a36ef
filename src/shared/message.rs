/**
 * Chat Message Data Structure
 *
 * This module defines the ChatMessage struct posted to the OrcaX chat board
 * and its JSON shape. Keys are camelCase because the board's clients send
 * `kakaoId` / `nickname` / `message` and expect `ts` back.
 */
use serde::{Deserialize, Serialize};

/// A single chat board message
///
/// # Fields
/// * `kakao_id` - Optional external account identifier of the poster
/// * `nickname` - Display name shown on the board
/// * `message` - The message text
/// * `ts` - Milliseconds since the Unix epoch, assigned by the server
///
/// # Example
/// ```rust
/// use orcax::shared::ChatMessage;
///
/// let message = ChatMessage::new(None, "Alice".to_string(), "hi".to_string());
/// assert_eq!(message.nickname, "Alice");
/// assert!(message.ts > 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kakao_id: Option<String>,
    pub nickname: String,
    pub message: String,
    pub ts: i64,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(kakao_id: Option<String>, nickname: String, message: String) -> Self {
        Self {
            kakao_id,
            nickname,
            message,
            ts: now_millis(),
        }
    }

    /// Create a message with an explicit timestamp
    ///
    /// Used when rebuilding the log from persisted rows.
    pub fn with_ts(kakao_id: Option<String>, nickname: String, message: String, ts: i64) -> Self {
        Self {
            kakao_id,
            nickname,
            message,
            ts,
        }
    }
}

/// Current UTC time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let message = ChatMessage::with_ts(
            Some("k1".to_string()),
            "Alice".to_string(),
            "hello".to_string(),
            42,
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["kakaoId"], "k1");
        assert_eq!(json["nickname"], "Alice");
        assert_eq!(json["ts"], 42);
    }

    #[test]
    fn test_kakao_id_omitted_when_absent() {
        let message = ChatMessage::with_ts(None, "Bob".to_string(), "yo".to_string(), 1);
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("kakaoId"));
    }
}
