//! Strategy #4: bare `name(arg=value, ...)` call syntax.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use reagent_types::{ActionInput, ModelProfile, OutcomeVariant, ParseOutcome};
use regex::Regex;

use crate::json::parse_scalar;
use crate::strategy::Strategy;

const CONFIDENCE: f64 = 0.60;

lazy_static! {
    static ref CALL: Regex = Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\(([^)]*)\)").unwrap();
}

/// Recognizes call-expression syntax such as
/// `get_weather(location="Tokyo", units=celsius)`.
pub struct FunctionCall;

impl Strategy for FunctionCall {
    fn try_parse(&self, raw: &str, _profile: &ModelProfile) -> Option<ParseOutcome> {
        let caps = CALL.captures(raw)?;
        let action = caps[1].to_string();
        let args_text = caps[2].to_string();

        let mut action_input = BTreeMap::new();
        for piece in split_args(&args_text) {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            if let Some(idx) = piece.find('=') {
                let key = piece[..idx].trim();
                let value = parse_scalar(piece[idx + 1..].trim());
                if !key.is_empty() {
                    action_input.insert(key.to_string(), value);
                }
            }
        }

        Some(ParseOutcome::new(
            OutcomeVariant::ToolCall {
                thought: None,
                action,
                action_input: ActionInput::new(action_input),
            },
            CONFIDENCE,
            raw,
        ))
    }
}

/// Split `a=1, b="x, y"` on top-level commas, respecting quoted values.
fn split_args(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut in_string: Option<char> = None;

    for ch in text.chars() {
        match in_string {
            Some(q) if ch == q => {
                in_string = None;
                current.push(ch);
            }
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => {
                    in_string = Some(ch);
                    current.push(ch);
                }
                ',' => {
                    pieces.push(std::mem::take(&mut current));
                }
                _ => current.push(ch),
            },
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ModelProfile {
        ModelProfile::new("default-model")
    }

    #[test]
    fn parses_function_call_syntax() {
        let raw = r#"get_weather(location="Tokyo", units=celsius)"#;
        let outcome = FunctionCall.try_parse(raw, &profile()).unwrap();
        assert_eq!(outcome.confidence, 0.60);
        match outcome.variant {
            OutcomeVariant::ToolCall { action, action_input, .. } => {
                assert_eq!(action, "get_weather");
                assert_eq!(
                    action_input.get("location").and_then(reagent_types::Value::as_str),
                    Some("Tokyo")
                );
                assert_eq!(
                    action_input.get("units").and_then(reagent_types::Value::as_str),
                    Some("celsius")
                );
            }
            _ => panic!("expected ToolCall"),
        }
    }

    #[test]
    fn declines_without_call_syntax() {
        assert!(FunctionCall.try_parse("no parentheses here", &profile()).is_none());
    }
}
