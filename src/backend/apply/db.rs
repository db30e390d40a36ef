/**
 * Database Operations for Franchise Applications
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::Application;

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    owner: Option<String>,
    phone: Option<String>,
    biznum: Option<String>,
    region: Option<String>,
    addr: Option<String>,
    biztype: Option<String>,
    kakao_id: String,
    nickname: String,
    created_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: row.id,
            owner: row.owner,
            phone: row.phone,
            biznum: row.biznum,
            region: row.region,
            addr: row.addr,
            biztype: row.biztype,
            kakao_id: row.kakao_id,
            nickname: row.nickname,
            created_at: row.created_at,
        }
    }
}

/// Save an application to the database
pub async fn save_application(pool: &PgPool, application: &Application) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO applications
            (id, owner, phone, biznum, region, addr, biztype, kakao_id, nickname, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(application.id)
    .bind(&application.owner)
    .bind(&application.phone)
    .bind(&application.biznum)
    .bind(&application.region)
    .bind(&application.addr)
    .bind(&application.biztype)
    .bind(&application.kakao_id)
    .bind(&application.nickname)
    .bind(application.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load every application, newest first
pub async fn load_applications(pool: &PgPool) -> Result<Vec<Application>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT id, owner, phone, biznum, region, addr, biztype, kakao_id, nickname, created_at
        FROM applications
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Application::from).collect())
}
