//! Strategy #1: a direct final-answer marker, tried before anything else.

use lazy_static::lazy_static;
use reagent_types::{ModelProfile, OutcomeVariant, ParseOutcome};
use regex::Regex;

use crate::strategy::Strategy;

const CONFIDENCE: f64 = 0.95;

lazy_static! {
    static ref MARKER: Regex =
        Regex::new(r"(?i)(final answer:|answer:|result:|therefore,|in conclusion,)").unwrap();
}

/// Recognizes `Final Answer:`, `Answer:`, `Result:`, `Therefore,`, and
/// `In conclusion,` markers (case-insensitive), taking the rest of the
/// line as the answer text.
pub struct FinalAnswerExtraction;

impl Strategy for FinalAnswerExtraction {
    fn try_parse(&self, raw: &str, _profile: &ModelProfile) -> Option<ParseOutcome> {
        let m = MARKER.find(raw)?;
        let after = &raw[m.end()..];
        let tail = after.lines().next().unwrap_or(after).trim();
        if tail.is_empty() {
            return None;
        }
        Some(ParseOutcome::new(
            OutcomeVariant::FinalAnswer { text: tail.to_string() },
            CONFIDENCE,
            raw,
        ))
    }
}
