#![deny(missing_docs)]
//! Turns one raw model turn into a [`ParseOutcome`], never failing
//! fatally.
//!
//! Parsing tries a fixed, ordered cascade of [`strategy::Strategy`]
//! implementations and takes the first one that recognizes the input.
//! Nothing here inspects the conversation history or talks to a backend —
//! it is a pure function of `(raw text, model profile, strict mode)`.

pub mod json;
pub mod strategies;
pub mod strategy;

use reagent_types::{ModelProfile, ParseOutcome};
use tracing::trace;

use strategies::{Fallback, FinalAnswerExtraction, FunctionCall, IntentHeuristics, ModelSpecific, RegexVariants, StructuredReAct};
use strategy::Strategy;

/// Parse one raw model turn.
///
/// `strict_mode` disables the natural-language intent heuristics
/// (strategy #5) — callers that need output to hew close to the declared
/// grammar set this to `true`.
pub fn parse(raw: &str, profile: &ModelProfile, strict_mode: bool) -> ParseOutcome {
    let cascade: Vec<Box<dyn Strategy>> = if strict_mode {
        vec![
            Box::new(FinalAnswerExtraction),
            Box::new(StructuredReAct),
            Box::new(RegexVariants),
            Box::new(FunctionCall),
            Box::new(ModelSpecific),
        ]
    } else {
        vec![
            Box::new(FinalAnswerExtraction),
            Box::new(StructuredReAct),
            Box::new(RegexVariants),
            Box::new(FunctionCall),
            Box::new(IntentHeuristics),
            Box::new(ModelSpecific),
        ]
    };

    for strategy in &cascade {
        if let Some(outcome) = strategy.try_parse(raw, profile) {
            trace!(confidence = outcome.confidence, "strategy cascade matched");
            return outcome;
        }
    }

    Fallback.try_parse(raw, profile).expect("Fallback always matches")
}
