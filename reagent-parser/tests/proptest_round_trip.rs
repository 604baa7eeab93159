//! Property-based tests: Action-Input round-trip and cascade determinism.

use proptest::prelude::*;
use reagent_parser::json::decode_action_input;
use reagent_parser::parse;
use reagent_types::{ActionInput, ModelProfile, Value};
use std::collections::BTreeMap;

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,12}".prop_map(Value::String),
        (-1000i32..1000).prop_map(|n| Value::Number(n as f64)),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn action_input() -> impl Strategy<Value = ActionInput> {
    prop::collection::vec(("[a-z][a-z0-9_]{0,8}", scalar_value()), 0..6)
        .prop_map(|pairs| ActionInput::new(pairs.into_iter().collect::<BTreeMap<_, _>>()))
}

proptest! {
    /// Well-formed JSON action input survives parse -> serialize -> parse
    /// with identical values; key order is incidental since `ActionInput`
    /// stores a `BTreeMap`.
    #[test]
    fn round_trip_is_idempotent_on_well_formed_json(input in action_input()) {
        let text = input.to_json().to_string();
        let once = decode_action_input(&text);
        let twice = decode_action_input(&once.to_json().to_string());
        prop_assert_eq!(once, twice);
    }

    /// Decoding the same raw text twice always yields the same
    /// `ActionInput`, across every rung of the cleanup cascade.
    #[test]
    fn decode_action_input_is_deterministic(raw in ".{0,80}") {
        let first = decode_action_input(&raw);
        let second = decode_action_input(&raw);
        prop_assert_eq!(first, second);
    }

    /// The strategy cascade is a pure function of its inputs: the same raw
    /// turn against the same profile always yields the same outcome.
    #[test]
    fn parse_is_deterministic(raw in ".{0,120}", strict in any::<bool>()) {
        let profile = ModelProfile::new("default-model");
        let first = parse(&raw, &profile, strict);
        let second = parse(&raw, &profile, strict);
        prop_assert_eq!(first, second);
    }
}
