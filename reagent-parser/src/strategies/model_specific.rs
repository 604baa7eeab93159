//! Strategy #6: idioms specific to a model's variant tag.

use lazy_static::lazy_static;
use reagent_types::{ActionInput, ModelProfile, OutcomeVariant, ParseOutcome, VariantTag};
use regex::Regex;

use crate::json::decode_action_input;
use crate::strategy::Strategy;

const CONFIDENCE: f64 = 0.70;

lazy_static! {
    static ref PHI_IDIOM: Regex =
        Regex::new(r"(?i)I (?:need to|will|should) (?:use|call) the (\w+) (?:tool|function)").unwrap();
    static ref GEMMA_IDIOM: Regex = Regex::new(r"(?m)^([a-z][a-z0-9_]{2,48}):\s*(.*)$").unwrap();
}

/// Recognizes the idiom a model's own variant tends to produce instead of
/// the canonical grammar: Phi's "I will use the X tool" phrasing, or
/// Gemma's bare `identifier: args` line.
pub struct ModelSpecific;

impl Strategy for ModelSpecific {
    fn try_parse(&self, raw: &str, profile: &ModelProfile) -> Option<ParseOutcome> {
        match profile.variant_tag {
            VariantTag::Phi => {
                let caps = PHI_IDIOM.captures(raw)?;
                let action = caps.get(1)?.as_str().to_string();
                Some(ParseOutcome::new(
                    OutcomeVariant::ToolCall {
                        thought: None,
                        action,
                        action_input: ActionInput::empty(),
                    },
                    CONFIDENCE,
                    raw,
                ))
            }
            VariantTag::Gemma => {
                let caps = GEMMA_IDIOM.captures(raw)?;
                let action = caps.get(1)?.as_str().to_string();
                let tail = caps.get(2)?.as_str();
                Some(ParseOutcome::new(
                    OutcomeVariant::ToolCall {
                        thought: None,
                        action,
                        action_input: decode_action_input(tail),
                    },
                    CONFIDENCE,
                    raw,
                ))
            }
            VariantTag::Default => None,
        }
    }
}
