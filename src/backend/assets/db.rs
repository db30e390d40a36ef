/**
 * PostgreSQL Asset Stores
 *
 * Database-backed implementations of the asset store traits.
 *
 * - `PgUserStore` keeps one row per user in `user_assets`. The fetch-or-create
 *   is a single `INSERT ... ON CONFLICT DO UPDATE ... RETURNING`, so concurrent
 *   first access cannot create two rows.
 * - `PgLedger` reads one append-only ledger table. Entries are folded with the
 *   same aggregation the in-memory ledgers use, so malformed deltas are
 *   coerced identically.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::assets::store::{
    aggregate, Aggregation, LedgerEntry, LedgerKind, LedgerStore, LedgerTotals, StoreError, UserRecord,
    UserStore,
};

#[derive(sqlx::FromRow)]
struct UserAssetRow {
    user_id: String,
    display_name: String,
    resources: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserAssetRow> for UserRecord {
    fn from(row: UserAssetRow) -> Self {
        Self {
            user_id: row.user_id,
            display_name: row.display_name,
            resources: row.resources,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// User store backed by the `user_assets` table
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn upsert_profile(
        &self,
        user_id: &str,
        display_name: &str,
        initial: &Value,
    ) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserAssetRow>(
            r#"
            INSERT INTO user_assets (user_id, display_name, resources, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, display_name, resources, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(display_name)
        .bind(initial)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

#[derive(sqlx::FromRow)]
struct LedgerRow {
    user_id: String,
    deltas: Value,
    recorded_at: DateTime<Utc>,
}

impl From<LedgerRow> for LedgerEntry {
    fn from(row: LedgerRow) -> Self {
        let deltas = match row.deltas {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            user_id: row.user_id,
            deltas,
            recorded_at: row.recorded_at,
        }
    }
}

/// Ledger backed by one append-only table
#[derive(Debug, Clone)]
pub struct PgLedger {
    pool: PgPool,
    kind: LedgerKind,
}

impl PgLedger {
    pub fn new(pool: PgPool, kind: LedgerKind) -> Self {
        Self { pool, kind }
    }

    /// Table holding entries of `kind`
    pub fn table_name(kind: LedgerKind) -> &'static str {
        match kind {
            LedgerKind::FarmUsage => "farm_usage",
            LedgerKind::Harvest => "harvest_log",
            LedgerKind::Inventory => "inventory_snapshots",
        }
    }

    /// One ledger per kind, all sharing `pool`
    pub fn all(pool: &PgPool) -> Vec<Self> {
        [LedgerKind::FarmUsage, LedgerKind::Harvest, LedgerKind::Inventory]
            .into_iter()
            .map(|kind| Self::new(pool.clone(), kind))
            .collect()
    }
}

#[async_trait]
impl LedgerStore for PgLedger {
    fn name(&self) -> &str {
        Self::table_name(self.kind)
    }

    fn kind(&self) -> LedgerKind {
        self.kind
    }

    async fn totals(&self, user_id: &str) -> Result<LedgerTotals, StoreError> {
        let table = Self::table_name(self.kind);
        let query = match self.kind.aggregation() {
            Aggregation::Sum => format!(
                "SELECT user_id, deltas, recorded_at FROM {} WHERE user_id = $1",
                table
            ),
            Aggregation::Latest => format!(
                "SELECT user_id, deltas, recorded_at FROM {} WHERE user_id = $1 \
                 ORDER BY recorded_at DESC LIMIT 1",
                table
            ),
        };

        let rows = sqlx::query_as::<_, LedgerRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Read {} {} rows for {}", rows.len(), table, user_id);

        let entries: Vec<LedgerEntry> = rows.into_iter().map(LedgerEntry::from).collect();
        Ok(aggregate(self.kind, entries.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_kind_has_its_own_table() {
        assert_eq!(PgLedger::table_name(LedgerKind::FarmUsage), "farm_usage");
        assert_eq!(PgLedger::table_name(LedgerKind::Harvest), "harvest_log");
        assert_eq!(PgLedger::table_name(LedgerKind::Inventory), "inventory_snapshots");
    }

    #[test]
    fn test_non_object_row_becomes_empty_entry() {
        let entry = LedgerEntry::from(LedgerRow {
            user_id: "u1".to_string(),
            deltas: json!([1, 2, 3]),
            recorded_at: Utc::now(),
        });
        assert!(entry.deltas.is_empty());
    }
}
