/**
 * Store Abstractions
 *
 * The asset resolver reads from two kinds of collaborators:
 *
 * - a **user store** holding one semi-structured record per user identifier,
 *   written through an atomic fetch-or-create
 * - any number of **ledger stores**, append-only event logs attributed to a
 *   user and aggregated on read
 *
 * Both are async traits so the same resolver runs against the in-memory
 * stores and the PostgreSQL-backed ones.
 */

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::assets::fields::{finite, finite_or_zero};

/// Errors raised by user and ledger stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the request
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Underlying database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A user's primary record
///
/// `resources` is the raw resource document. It may contain top-level
/// quantities (`water`, `token`, ...) as well as nested `storage`, `growth`
/// and `products` groupings written by older clients.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub user_id: String,
    pub display_name: String,
    pub resources: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Primary user store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Atomically fetch or create the record for `user_id`
    ///
    /// A missing record is created with `display_name` and `initial` as its
    /// resource document. An existing record only gets its display name and
    /// `updated_at` refreshed; its resources are left untouched. Two
    /// concurrent calls for the same unseen identifier must create exactly
    /// one record.
    async fn upsert_profile(
        &self,
        user_id: &str,
        display_name: &str,
        initial: &Value,
    ) -> Result<UserRecord, StoreError>;
}

/// What a ledger records and how its entries combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    /// Water and fertilizer consumed by farming actions
    FarmUsage,
    /// Tokens and crops harvested
    Harvest,
    /// Point-in-time seed inventory
    Inventory,
}

/// How entries of one ledger are folded into a single reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Sum every entry
    Sum,
    /// Take the most recent entry only
    Latest,
}

impl LedgerKind {
    pub fn aggregation(self) -> Aggregation {
        match self {
            Self::FarmUsage | Self::Harvest => Aggregation::Sum,
            Self::Inventory => Aggregation::Latest,
        }
    }

    /// Entry keys this ledger contributes
    pub fn tracked_fields(self) -> &'static [&'static str] {
        match self {
            Self::FarmUsage => &["waterUsed", "fertilizerUsed"],
            Self::Harvest => &["token", "potato", "barley"],
            Self::Inventory => &["seedPotato", "seedBarley"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FarmUsage => "farm_usage",
            Self::Harvest => "harvest",
            Self::Inventory => "inventory",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated values of one ledger for one user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerTotals {
    values: BTreeMap<String, f64>,
}

impl LedgerTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: f64) {
        self.values.insert(field.into(), value);
    }

    /// Value of `field`, with missing and non-finite values read as zero
    pub fn get(&self, field: &str) -> f64 {
        self.values.get(field).copied().map(finite).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One append-only ledger event
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub user_id: String,
    pub deltas: Map<String, Value>,
    pub recorded_at: DateTime<Utc>,
}

/// Auxiliary ledger store
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Name used in logs and degradation reports
    fn name(&self) -> &str;

    fn kind(&self) -> LedgerKind;

    /// Aggregated values for `user_id` according to [`LedgerKind::aggregation`]
    async fn totals(&self, user_id: &str) -> Result<LedgerTotals, StoreError>;
}

/// Fold one user's entries according to the ledger kind
///
/// For point-in-time ledgers the newest entry wins; among entries with the
/// same timestamp the one appended last wins.
pub fn aggregate<'a>(kind: LedgerKind, entries: impl Iterator<Item = &'a LedgerEntry>) -> LedgerTotals {
    let fields = kind.tracked_fields();
    let mut totals = LedgerTotals::new();

    match kind.aggregation() {
        Aggregation::Sum => {
            let mut sums = vec![0.0; fields.len()];
            for entry in entries {
                for (sum, field) in sums.iter_mut().zip(fields) {
                    *sum += finite_or_zero(entry.deltas.get(*field));
                }
            }
            for (field, sum) in fields.iter().zip(sums) {
                totals.set(*field, sum);
            }
        }
        Aggregation::Latest => {
            let latest = entries.fold(None::<&LedgerEntry>, |latest, entry| match latest {
                Some(current) if current.recorded_at > entry.recorded_at => Some(current),
                _ => Some(entry),
            });
            if let Some(entry) = latest {
                for field in fields {
                    totals.set(*field, finite_or_zero(entry.deltas.get(*field)));
                }
            }
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_read_non_finite_as_zero() {
        let totals = LedgerTotals::new()
            .with("waterUsed", f64::NAN)
            .with("fertilizerUsed", f64::INFINITY)
            .with("token", 4.0);

        assert_eq!(totals.get("waterUsed"), 0.0);
        assert_eq!(totals.get("fertilizerUsed"), 0.0);
        assert_eq!(totals.get("token"), 4.0);
        assert_eq!(totals.get("missing"), 0.0);
    }

    #[test]
    fn test_only_inventory_is_point_in_time() {
        assert_eq!(LedgerKind::FarmUsage.aggregation(), Aggregation::Sum);
        assert_eq!(LedgerKind::Harvest.aggregation(), Aggregation::Sum);
        assert_eq!(LedgerKind::Inventory.aggregation(), Aggregation::Latest);
    }
}
