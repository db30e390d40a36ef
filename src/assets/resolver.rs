/**
 * Asset View Resolver
 *
 * Produces the fully-defaulted [`AssetSnapshot`] for a user.
 *
 * # Resolution
 *
 * 1. Validate the identifier and display name (no store is touched when
 *    either is blank)
 * 2. Fetch-or-create the user record through one atomic store call
 * 3. Read every ledger concurrently, each under its own timeout
 * 4. Project the record and the readings into a snapshot
 *
 * # Failure Policy
 *
 * Only the user store is essential. A ledger that errors or times out is
 * logged, reported in [`Resolution::degraded`] and contributes zero for this
 * call; the next call reads it afresh.
 */

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use thiserror::Error;

use crate::assets::projection::{project_assets, LedgerReading};
use crate::assets::store::{LedgerKind, LedgerStore, StoreError, UserStore};
use crate::shared::{require_text, AssetSnapshot, ResolverConfig, SharedError};

/// Errors surfaced to resolver callers
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Blank or missing identifier or display name
    #[error("invalid input: {0}")]
    InvalidInput(#[from] SharedError),

    /// The primary user store failed; no snapshot can be built
    #[error("user store failure: {0}")]
    StoreFailure(#[source] StoreError),
}

/// Why a ledger contributed nothing
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    TimedOut(Duration),
    Store(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut(after) => write!(f, "timed out after {}ms", after.as_millis()),
            Self::Store(message) => f.write_str(message),
        }
    }
}

/// A ledger that was skipped during one resolution
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub source: String,
    pub kind: LedgerKind,
    pub reason: FailureReason,
}

/// Snapshot plus the ledgers that were degraded while building it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub snapshot: AssetSnapshot,
    pub degraded: Vec<SourceFailure>,
}

/// Builds asset snapshots from a user store and a set of ledgers
pub struct AssetResolver {
    users: Arc<dyn UserStore>,
    ledgers: Vec<Arc<dyn LedgerStore>>,
    config: ResolverConfig,
}

impl AssetResolver {
    pub fn new(users: Arc<dyn UserStore>, config: ResolverConfig) -> Self {
        Self {
            users,
            ledgers: Vec::new(),
            config,
        }
    }

    /// Register an auxiliary ledger
    pub fn with_ledger(mut self, ledger: Arc<dyn LedgerStore>) -> Self {
        self.ledgers.push(ledger);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn ledger_count(&self) -> usize {
        self.ledgers.len()
    }

    /// Resolve the snapshot for `user_id`, refreshing its display name
    pub async fn resolve(&self, user_id: &str, display_name: &str) -> Result<AssetSnapshot, ResolveError> {
        self.resolve_detailed(user_id, display_name)
            .await
            .map(|resolution| resolution.snapshot)
    }

    /// Like [`resolve`](Self::resolve), also reporting degraded ledgers
    pub async fn resolve_detailed(&self, user_id: &str, display_name: &str) -> Result<Resolution, ResolveError> {
        let user_id = require_text("userId", Some(user_id))?;
        let display_name = require_text("displayName", Some(display_name))?;

        let initial = self.config.defaults.to_document();
        let record = self
            .users
            .upsert_profile(&user_id, &display_name, &initial)
            .await
            .map_err(|e| {
                tracing::error!("User store failed for {}: {}", user_id, e);
                ResolveError::StoreFailure(e)
            })?;

        let (readings, degraded) = self.read_ledgers(&user_id).await;
        let snapshot = project_assets(&record.display_name, &record.resources, &readings);

        tracing::debug!(
            "Resolved assets for {} ({} ledgers read, {} degraded)",
            user_id,
            readings.len(),
            degraded.len()
        );

        Ok(Resolution { snapshot, degraded })
    }

    async fn read_ledgers(&self, user_id: &str) -> (Vec<LedgerReading>, Vec<SourceFailure>) {
        let timeout = self.config.ledger_timeout;

        let reads = self.ledgers.iter().map(|ledger| async move {
            let outcome = tokio::time::timeout(timeout, ledger.totals(user_id)).await;
            (ledger, outcome)
        });

        let mut readings = Vec::with_capacity(self.ledgers.len());
        let mut degraded = Vec::new();

        for (ledger, outcome) in join_all(reads).await {
            let reason = match outcome {
                Ok(Ok(totals)) => {
                    readings.push(LedgerReading::new(ledger.name(), ledger.kind(), totals));
                    continue;
                }
                Ok(Err(e)) => FailureReason::Store(e.to_string()),
                Err(_) => FailureReason::TimedOut(timeout),
            };

            tracing::warn!(
                "Ledger {} ({}) unavailable for {}, using zero contribution: {}",
                ledger.name(),
                ledger.kind(),
                user_id,
                reason
            );
            degraded.push(SourceFailure {
                source: ledger.name().to_string(),
                kind: ledger.kind(),
                reason,
            });
        }

        (readings, degraded)
    }
}
