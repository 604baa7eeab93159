//! Strategy #3: the same grammar shape as [`crate::strategies::structured_react`],
//! accepting synonym prefixes, Markdown emphasis, and bullet lists, and
//! decoding the action input with the full cleanup cascade rather than
//! requiring strict JSON.

use lazy_static::lazy_static;
use reagent_types::{ModelProfile, OutcomeVariant, ParseOutcome};
use regex::Regex;

use crate::json::decode_action_input;
use crate::strategy::Strategy;

const CONFIDENCE: f64 = 0.80;

lazy_static! {
    static ref THOUGHT: Regex =
        Regex::new(r"(?mi)^[*\-\s]*(?:Thought|Thinking|Reasoning)\s*:?\*{0,2}\s*(.*)$").unwrap();
    static ref ACTION: Regex =
        Regex::new(r"(?mi)^[*\-\s]*(?:Action|Tool|Function)\s*:\*{0,2}\s*([A-Za-z_][A-Za-z0-9_]*)\s*\**\s*$")
            .unwrap();
    static ref ACTION_INPUT: Regex =
        Regex::new(r"(?mi)^[*\-\s]*(?:Action\s*Input|Input|Parameters|Args)\s*:\*{0,2}\s*(.*)$").unwrap();
}

/// Accepts `Thought|Thinking|Reasoning`, `Action|Tool|Function`, and
/// `Input|Parameters|Args` prefix synonyms, plus Markdown-bold and
/// bullet-list decoration around any of them.
pub struct RegexVariants;

impl Strategy for RegexVariants {
    fn try_parse(&self, raw: &str, _profile: &ModelProfile) -> Option<ParseOutcome> {
        let action_caps = ACTION.captures(raw)?;
        let action = action_caps.get(1)?.as_str().to_string();
        let thought = THOUGHT
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let input_tail = ACTION_INPUT.captures(raw)?.get(1)?.as_str();

        let action_input = decode_action_input(input_tail);

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

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ModelProfile {
        ModelProfile::new("default-model")
    }

    #[test]
    fn accepts_tool_and_parameters_synonyms() {
        let raw = "Reasoning: need data\nTool: get_weather\nParameters: location=Paris, units=celsius";
        let outcome = RegexVariants.try_parse(raw, &profile()).unwrap();
        assert_eq!(outcome.confidence, 0.80);
        match outcome.variant {
            OutcomeVariant::ToolCall { action, action_input, .. } => {
                assert_eq!(action, "get_weather");
                assert_eq!(
                    action_input.get("location").and_then(reagent_types::Value::as_str),
                    Some("Paris")
                );
            }
            _ => panic!("expected ToolCall"),
        }
    }

    #[test]
    fn accepts_markdown_bold_prefixes() {
        let raw = "**Action:** search\n**Input:** query=rust";
        let outcome = RegexVariants.try_parse(raw, &profile()).unwrap();
        match outcome.variant {
            OutcomeVariant::ToolCall { action, .. } => assert_eq!(action, "search"),
            _ => panic!("expected ToolCall"),
        }
    }

    #[test]
    fn declines_without_an_action_like_line() {
        assert!(RegexVariants.try_parse("just rambling text", &profile()).is_none());
    }
}
