//! Field precedence table and numeric coercion
//!
//! User records have been written by several schema generations. The same
//! logical quantity may live at the top level (`potato`), inside a nested
//! collection under a legacy name (`storage.gamja`), or under an alternate
//! name (`orcx` for `token`). Each logical field therefore has an ordered list
//! of source paths; the first path that holds a non-null value wins. Sources
//! are never merged.

use serde_json::Value;

/// A path into the resource document, outermost key first
pub type SourcePath = &'static [&'static str];

/// Logical asset fields resolved from the user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetField {
    Water,
    Fertilizer,
    Token,
    Potato,
    Barley,
}

impl AssetField {
    pub const ALL: [AssetField; 5] = [
        AssetField::Water,
        AssetField::Fertilizer,
        AssetField::Token,
        AssetField::Potato,
        AssetField::Barley,
    ];

    /// Source paths in precedence order
    pub fn sources(self) -> &'static [SourcePath] {
        match self {
            Self::Water => &[&["water"]],
            Self::Fertilizer => &[&["fertilizer"]],
            Self::Token => &[&["token"], &["orcx"]],
            Self::Potato => &[&["storage", "gamja"], &["growth", "gamja"], &["potato"]],
            Self::Barley => &[&["storage", "bori"], &["growth", "bori"], &["barley"]],
        }
    }
}

/// Follow `path` through nested objects
///
/// A JSON `null` counts as absent, so it does not shadow lower-precedence
/// sources.
pub fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = doc;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Resolve a logical field from the record document
///
/// Returns the coerced value of the first defined source, or 0.
pub fn resolve_base(doc: &Value, field: AssetField) -> f64 {
    field
        .sources()
        .iter()
        .find_map(|path| lookup(doc, path))
        .map(|value| finite_or_zero(Some(value)))
        .unwrap_or(0.0)
}

/// Coerce a stored value to a finite number
///
/// Numbers and numeric strings are accepted; everything else, including
/// non-finite results, reads as 0.
pub fn finite_or_zero(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.map(finite).unwrap_or(0.0)
}

/// Map NaN and infinities to 0
pub fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Finite, clamped at zero (also normalizes `-0.0`)
pub fn non_negative(value: f64) -> f64 {
    let value = finite(value);
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_storage_alias_beats_top_level() {
        let doc = json!({ "storage": { "gamja": 5 }, "potato": 9 });
        assert_eq!(resolve_base(&doc, AssetField::Potato), 5.0);
    }

    #[test]
    fn test_growth_alias_beats_top_level() {
        let doc = json!({ "growth": { "bori": 2 }, "barley": 7 });
        assert_eq!(resolve_base(&doc, AssetField::Barley), 2.0);
    }

    #[test]
    fn test_storage_beats_growth() {
        let doc = json!({ "storage": { "bori": 1 }, "growth": { "bori": 8 } });
        assert_eq!(resolve_base(&doc, AssetField::Barley), 1.0);
    }

    #[test]
    fn test_alternate_token_name() {
        assert_eq!(resolve_base(&json!({ "orcx": 22 }), AssetField::Token), 22.0);
        assert_eq!(resolve_base(&json!({ "token": 3, "orcx": 22 }), AssetField::Token), 3.0);
    }

    #[test]
    fn test_null_falls_through() {
        let doc = json!({ "storage": { "gamja": null }, "potato": 4 });
        assert_eq!(resolve_base(&doc, AssetField::Potato), 4.0);
    }

    #[test]
    fn test_malformed_source_still_wins() {
        // The nested alias is defined, so the top-level value is not consulted.
        let doc = json!({ "storage": { "gamja": "lots" }, "potato": 4 });
        assert_eq!(resolve_base(&doc, AssetField::Potato), 0.0);
    }

    #[test]
    fn test_non_object_collection_is_skipped() {
        let doc = json!({ "storage": [1, 2, 3], "potato": 6 });
        assert_eq!(resolve_base(&doc, AssetField::Potato), 6.0);
    }

    #[test]
    fn test_missing_everything_is_zero() {
        for field in AssetField::ALL {
            assert_eq!(resolve_base(&json!({}), field), 0.0);
            assert_eq!(resolve_base(&Value::Null, field), 0.0);
        }
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(Some(&json!(1.5))), 1.5);
        assert_eq!(finite_or_zero(Some(&json!(" 12 "))), 12.0);
        assert_eq!(finite_or_zero(Some(&json!("NaN"))), 0.0);
        assert_eq!(finite_or_zero(Some(&json!("inf"))), 0.0);
        assert_eq!(finite_or_zero(Some(&json!(true))), 0.0);
        assert_eq!(finite_or_zero(Some(&json!({ "a": 1 }))), 0.0);
        assert_eq!(finite_or_zero(None), 0.0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-7.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert!(non_negative(-0.0).is_sign_positive());
        assert_eq!(non_negative(3.5), 3.5);
    }
}
