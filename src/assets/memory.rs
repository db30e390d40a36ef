/**
 * In-Memory Stores
 *
 * Process-local implementations of [`UserStore`] and [`LedgerStore`]. They
 * back the server when no database is configured and are what the tests run
 * against.
 *
 * The user map sits behind a single async mutex, so the check-then-insert of
 * `upsert_profile` happens atomically with respect to other callers.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, RwLock};

use crate::assets::store::{
    aggregate, LedgerEntry, LedgerKind, LedgerStore, LedgerTotals, StoreError, UserRecord, UserStore,
};

/// User store held in a process-local map
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    pub async fn get(&self, user_id: &str) -> Option<UserRecord> {
        self.records.lock().await.get(user_id).cloned()
    }

    /// Store a record as-is, replacing any existing one
    ///
    /// Used to load records written by older clients, whose resource
    /// documents do not follow the current shape.
    pub async fn insert_record(&self, record: UserRecord) {
        self.records.lock().await.insert(record.user_id.clone(), record);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn upsert_profile(
        &self,
        user_id: &str,
        display_name: &str,
        initial: &Value,
    ) -> Result<UserRecord, StoreError> {
        let now = Utc::now();
        let mut records = self.records.lock().await;

        let record = records
            .entry(user_id.to_string())
            .and_modify(|record| {
                record.display_name = display_name.to_string();
                record.updated_at = now;
            })
            .or_insert_with(|| {
                tracing::debug!("Creating user record for {}", user_id);
                UserRecord {
                    user_id: user_id.to_string(),
                    display_name: display_name.to_string(),
                    resources: initial.clone(),
                    created_at: now,
                    updated_at: now,
                }
            });

        Ok(record.clone())
    }
}

/// Append-only ledger held in memory
#[derive(Debug)]
pub struct MemoryLedger {
    name: String,
    kind: LedgerKind,
    entries: RwLock<Vec<LedgerEntry>>,
}

impl MemoryLedger {
    pub fn new(name: impl Into<String>, kind: LedgerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append an entry for `user_id`
    ///
    /// `deltas` is expected to be a JSON object; anything else is stored as
    /// an empty entry and contributes nothing.
    pub async fn append(&self, user_id: &str, deltas: Value) {
        let deltas = match deltas {
            Value::Object(map) => map,
            other => {
                tracing::warn!("Ignoring non-object ledger entry for {}: {}", user_id, other);
                Map::new()
            }
        };

        self.entries.write().await.push(LedgerEntry {
            user_id: user_id.to_string(),
            deltas,
            recorded_at: Utc::now(),
        });
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> LedgerKind {
        self.kind
    }

    async fn totals(&self, user_id: &str) -> Result<LedgerTotals, StoreError> {
        let entries = self.entries.read().await;
        Ok(aggregate(
            self.kind,
            entries.iter().filter(|entry| entry.user_id == user_id),
        ))
    }
}
