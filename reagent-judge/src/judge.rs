//! The judge's single entry point: compare a parsed outcome against a
//! declared expectation.

use reagent_types::{ExpectedOutcome, OutcomeVariant, ParseOutcome};

use crate::aliases::{key_aliases, names_match};
use crate::compare::values_match;
use crate::verdict::Verdict;

/// Judge `actual` against `expected`, producing a pass/fail verdict with a
/// one-line diagnostic. This function never panics and never errors — an
/// unrecognized shape simply fails with a diagnostic explaining why.
pub fn judge(expected: &ExpectedOutcome, actual: &ParseOutcome) -> Verdict {
    match expected {
        ExpectedOutcome::ExpectToolCall { name, args } => judge_tool_call(name.as_deref(), args.as_ref(), actual),
        ExpectedOutcome::ExpectFinalAnswer => judge_final_answer(actual),
        ExpectedOutcome::ExpectAny => judge_any(actual),
    }
}

fn judge_tool_call(
    expected_name: Option<&str>,
    expected_args: Option<&std::collections::BTreeMap<String, reagent_types::Value>>,
    actual: &ParseOutcome,
) -> Verdict {
    let (action, action_input) = match &actual.variant {
        OutcomeVariant::ToolCall { action, action_input, .. } => (action, action_input),
        OutcomeVariant::FinalAnswer { .. } => {
            return Verdict::fail("expected a tool call but got a final answer");
        }
        OutcomeVariant::Fallback { .. } => {
            return Verdict::fail("expected a tool call but parsing fell back to unstructured text");
        }
    };

    if let Some(expected_name) = expected_name {
        if !names_match(action, expected_name) {
            return Verdict::fail(format!(
                "tool name mismatch: expected \"{expected_name}\" (fuzzy), got \"{action}\""
            ));
        }
    }

    if let Some(expected_args) = expected_args {
        for (key, expected_value) in expected_args {
            let actual_value = action_input.get(key).or_else(|| {
                key_aliases(key)
                    .into_iter()
                    .find_map(|alias| action_input.get(alias))
            });

            match actual_value {
                Some(actual_value) if values_match(actual_value, expected_value) => {}
                Some(actual_value) => {
                    return Verdict::fail(format!(
                        "argument \"{key}\" mismatch: expected {expected_value:?}, got {actual_value:?}"
                    ));
                }
                None => {
                    return Verdict::fail(format!("argument \"{key}\" missing (and no alias matched)"));
                }
            }
        }
    }

    Verdict::pass("tool call matched expected name and arguments")
}

fn judge_final_answer(actual: &ParseOutcome) -> Verdict {
    let text = match &actual.variant {
        OutcomeVariant::FinalAnswer { text } => text,
        OutcomeVariant::Fallback { text } => text,
        OutcomeVariant::ToolCall { .. } => {
            return Verdict::fail("expected a final answer but got a tool call");
        }
    };

    if text.trim().is_empty() {
        return Verdict::fail("expected a final answer but the text was empty");
    }

    Verdict::pass("final answer present and non-empty")
}

fn judge_any(actual: &ParseOutcome) -> Verdict {
    let empty = match &actual.variant {
        OutcomeVariant::FinalAnswer { text } | OutcomeVariant::Fallback { text } => text.trim().is_empty(),
        OutcomeVariant::ToolCall { action, .. } => action.is_empty(),
    };

    if empty {
        return Verdict::fail("outcome was empty");
    }

    Verdict::pass("any non-empty outcome accepted")
}
