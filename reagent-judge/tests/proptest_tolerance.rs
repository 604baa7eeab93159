//! Property-based tests: numeric tolerance in tolerant value comparison.

use proptest::prelude::*;
use reagent_judge::compare::{values_match, NUMERIC_TOLERANCE};
use reagent_types::Value;

proptest! {
    /// Two numbers within the declared tolerance always compare equal,
    /// regardless of which side is larger.
    #[test]
    fn numbers_within_tolerance_always_match(base in -1e6f64..1e6, delta in -NUMERIC_TOLERANCE..NUMERIC_TOLERANCE) {
        let actual = Value::Number(base + delta);
        let expected = Value::Number(base);
        prop_assert!(values_match(&actual, &expected));
    }

    /// Two numbers further apart than the tolerance, on either side, never
    /// match on numeric grounds alone.
    #[test]
    fn numbers_outside_tolerance_never_match(base in -1e6f64..1e6, excess in (NUMERIC_TOLERANCE * 10.0)..1e5) {
        let actual = Value::Number(base + excess);
        let expected = Value::Number(base);
        prop_assert!(!values_match(&actual, &expected));
    }

    /// Comparison is symmetric for plain numeric equality.
    #[test]
    fn numeric_match_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        prop_assert_eq!(
            values_match(&Value::Number(a), &Value::Number(b)),
            values_match(&Value::Number(b), &Value::Number(a))
        );
    }
}
