/**
 * Asset Snapshot
 *
 * The fully-resolved, zero-defaulted view of a user's game assets. It is
 * recomputed on every request and never persisted. The JSON shape is fixed:
 * `displayName` plus seven numeric fields, all always present.
 */
use serde::{Deserialize, Serialize};

/// Resolved asset view returned by `/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    pub display_name: String,
    pub water: f64,
    pub fertilizer: f64,
    pub token: f64,
    pub potato: f64,
    pub barley: f64,
    pub seed_potato: f64,
    pub seed_barley: f64,
}

impl AssetSnapshot {
    /// Numeric fields paired with their JSON names
    pub fn numeric_fields(&self) -> [(&'static str, f64); 7] {
        [
            ("water", self.water),
            ("fertilizer", self.fertilizer),
            ("token", self.token),
            ("potato", self.potato),
            ("barley", self.barley),
            ("seedPotato", self.seed_potato),
            ("seedBarley", self.seed_barley),
        ]
    }
}
