//! Strategy #2: the canonical `Thought/Action/Action Input` grammar with a
//! strictly JSON action input body.

use lazy_static::lazy_static;
use reagent_types::{ModelProfile, OutcomeVariant, ParseOutcome};
use regex::Regex;

use crate::json::try_strict_json;
use crate::strategy::Strategy;

const CONFIDENCE: f64 = 1.00;

lazy_static! {
    static ref THOUGHT: Regex = Regex::new(r"(?m)^Thought:\s*(.*)$").unwrap();
    static ref ACTION: Regex = Regex::new(r"(?m)^Action:\s*([A-Za-z_][A-Za-z0-9_]*)\s*$").unwrap();
    static ref ACTION_INPUT: Regex = Regex::new(r"(?ms)^Action Input:\s*(.*)").unwrap();
}

/// Requires the canonical prefixes and a strictly-parseable JSON action
/// input — the highest-confidence strategy in the cascade.
pub struct StructuredReAct;

impl Strategy for StructuredReAct {
    fn try_parse(&self, raw: &str, _profile: &ModelProfile) -> Option<ParseOutcome> {
        let action = ACTION.captures(raw)?.get(1)?.as_str().to_string();
        let thought = THOUGHT.captures(raw).and_then(|c| c.get(1)).map(|m| m.as_str().trim().to_string());
        let input_start = ACTION_INPUT.captures(raw)?;
        let rest_from_marker = &raw[input_start.get(0)?.start()..];
        let body_start = rest_from_marker.find(':').map(|i| i + 1)?;
        let body = &rest_from_marker[body_start..];

        let action_input = try_strict_json(body)?;

        Some(ParseOutcome::new(
            OutcomeVariant::ToolCall {
                thought,
                action,
                action_input,
            },
            CONFIDENCE,
            raw,
        ))
    }
}
