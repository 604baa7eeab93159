//! Tolerant scalar comparison used once a key has been resolved (directly
//! or via an alias) to a value on both sides.

use reagent_types::Value;

/// Absolute tolerance applied to numeric comparisons after coercion.
pub const NUMERIC_TOLERANCE: f64 = 1e-3;

/// Whether `actual` satisfies `expected` under the judge's tolerant
/// comparison rule: identity, case-insensitive string equality, numeric
/// equality within [`NUMERIC_TOLERANCE`] after coercion, or case-insensitive
/// substring containment of `expected` within `actual`.
pub fn values_match(actual: &Value, expected: &Value) -> bool {
    if actual == expected {
        return true;
    }

    if let (Some(a), Some(e)) = (actual.as_str(), expected.as_str()) {
        if a.eq_ignore_ascii_case(e) {
            return true;
        }
    }

    if let (Some(a), Some(e)) = (actual.as_number(), expected.as_number()) {
        if (a - e).abs() <= NUMERIC_TOLERANCE {
            return true;
        }
    }

    if let (Some(a), Some(e)) = (actual.as_str(), expected.as_str()) {
        if a.to_lowercase().contains(&e.to_lowercase()) {
            return true;
        }
    }

    false
}
