//! Strategy #5: fixed regex → (tool name, query) intent heuristics.
//!
//! Only consulted in non-strict mode — callers that need parsing to stay
//! close to the literal grammar disable this strategy rather than guessing
//! intent from natural language.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use reagent_types::{ActionInput, ModelProfile, OutcomeVariant, ParseOutcome, Value};
use regex::Regex;

use crate::strategy::Strategy;

const CONFIDENCE: f64 = 0.60;

lazy_static! {
    static ref INTENTS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)^(?:search|find|look up) (?:for )?(.+)$").unwrap(), "search"),
        (Regex::new(r"(?i)^calculate (.+)$").unwrap(), "calculate"),
        (
            Regex::new(r"(?i)^(?:what'?s|what is) the weather (?:in|for) (.+)$").unwrap(),
            "get_weather"
        ),
    ];
}

/// Maps a fixed set of natural-language intents to a tool name and a
/// single `query` argument extracted from the match.
pub struct IntentHeuristics;

impl Strategy for IntentHeuristics {
    fn try_parse(&self, raw: &str, _profile: &ModelProfile) -> Option<ParseOutcome> {
        let trimmed = raw.trim();
        for (pattern, tool_name) in INTENTS.iter() {
            if let Some(caps) = pattern.captures(trimmed) {
                let query = caps.get(1)?.as_str().trim().trim_end_matches('?').to_string();
                let mut args = BTreeMap::new();
                args.insert("query".to_string(), Value::String(query));
                return Some(ParseOutcome::new(
                    OutcomeVariant::ToolCall {
                        thought: None,
                        action: tool_name.to_string(),
                        action_input: ActionInput::new(args),
                    },
                    CONFIDENCE,
                    raw,
                ));
            }
        }
        None
    }
}
