/**
 * Asset Projection
 *
 * Pure computation of an [`AssetSnapshot`] from a user's resource document
 * and the readings of its ledgers. No I/O happens here, so the rules can be
 * exercised without any store.
 *
 * # Rules
 *
 * - `token`, `potato`, `barley`: base value from the precedence table, plus
 *   harvest sums
 * - `water`, `fertilizer`: base value minus farm-usage consumption
 * - `seedPotato`, `seedBarley`: latest inventory reading
 * - every field is finite and clamped at zero
 */

use serde_json::Value;

use crate::assets::fields::{non_negative, resolve_base, AssetField};
use crate::assets::store::{LedgerKind, LedgerTotals};
use crate::shared::AssetSnapshot;

/// A successful read of one ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerReading {
    pub source: String,
    pub kind: LedgerKind,
    pub totals: LedgerTotals,
}

impl LedgerReading {
    pub fn new(source: impl Into<String>, kind: LedgerKind, totals: LedgerTotals) -> Self {
        Self {
            source: source.into(),
            kind,
            totals,
        }
    }
}

#[derive(Debug, Default)]
struct Contributions {
    water_used: f64,
    fertilizer_used: f64,
    harvested_token: f64,
    harvested_potato: f64,
    harvested_barley: f64,
    seed_potato: f64,
    seed_barley: f64,
}

impl Contributions {
    fn collect(readings: &[LedgerReading]) -> Self {
        let mut acc = Self::default();
        for reading in readings {
            let totals = &reading.totals;
            match reading.kind {
                LedgerKind::FarmUsage => {
                    acc.water_used += totals.get("waterUsed");
                    acc.fertilizer_used += totals.get("fertilizerUsed");
                }
                LedgerKind::Harvest => {
                    acc.harvested_token += totals.get("token");
                    acc.harvested_potato += totals.get("potato");
                    acc.harvested_barley += totals.get("barley");
                }
                // point-in-time: a later inventory reading replaces an earlier one
                LedgerKind::Inventory => {
                    acc.seed_potato = totals.get("seedPotato");
                    acc.seed_barley = totals.get("seedBarley");
                }
            }
        }
        acc
    }
}

/// Build the snapshot for `display_name` from a resource document and ledger readings
pub fn project_assets(display_name: &str, resources: &Value, readings: &[LedgerReading]) -> AssetSnapshot {
    let acc = Contributions::collect(readings);
    let base = |field| resolve_base(resources, field);

    AssetSnapshot {
        display_name: display_name.to_string(),
        water: non_negative(base(AssetField::Water) - acc.water_used),
        fertilizer: non_negative(base(AssetField::Fertilizer) - acc.fertilizer_used),
        token: non_negative(base(AssetField::Token) + acc.harvested_token),
        potato: non_negative(base(AssetField::Potato) + acc.harvested_potato),
        barley: non_negative(base(AssetField::Barley) + acc.harvested_barley),
        seed_potato: non_negative(acc.seed_potato),
        seed_barley: non_negative(acc.seed_barley),
    }
}
