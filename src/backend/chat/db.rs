/**
 * Database Operations for Chat Messages
 *
 * This module persists the chat log to PostgreSQL so it survives restarts.
 * The in-memory `ChatState` stays the source of truth for reads; the table
 * is only written on post/clear and read once at startup.
 */

use sqlx::PgPool;

use crate::backend::chat::state::MAX_MESSAGES;
use crate::shared::ChatMessage;

/// Save a message to the database
pub async fn save_message(pool: &PgPool, message: &ChatMessage) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO chat_messages (id, kakao_id, nickname, message, ts)
        VALUES (gen_random_uuid(), $1, $2, $3, $4)
        "#,
    )
    .bind(&message.kakao_id)
    .bind(&message.nickname)
    .bind(&message.message)
    .bind(message.ts)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the most recent messages from the database
///
/// # Returns
/// Up to `MAX_MESSAGES` messages ordered by timestamp, oldest first
pub async fn load_messages(pool: &PgPool) -> Result<Vec<ChatMessage>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct MessageRow {
        kakao_id: Option<String>,
        nickname: String,
        message: String,
        ts: i64,
    }

    let rows = sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT kakao_id, nickname, message, ts
        FROM chat_messages
        ORDER BY ts DESC
        LIMIT $1
        "#,
    )
    .bind(MAX_MESSAGES as i64)
    .fetch_all(pool)
    .await?;

    let messages: Vec<ChatMessage> = rows
        .into_iter()
        .rev()
        .map(|row| ChatMessage::with_ts(row.kakao_id, row.nickname, row.message, row.ts))
        .collect();

    Ok(messages)
}

/// Delete every stored message
///
/// # Returns
/// Number of deleted rows
pub async fn clear_messages(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chat_messages").execute(pool).await?;
    Ok(result.rows_affected())
}
