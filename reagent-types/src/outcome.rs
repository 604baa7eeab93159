//! The result of parsing one model turn.

use crate::value::ActionInput;

/// The shape of a parsed model turn.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeVariant {
    /// The model requested a tool call.
    ToolCall {
        /// The model's stated reasoning, if the grammar surfaced one.
        thought: Option<String>,
        /// The tool name, always non-empty.
        action: String,
        /// The tool's arguments. May be empty, but always a map.
        action_input: ActionInput,
    },
    /// The model produced a final answer for the user.
    FinalAnswer {
        /// The final answer text.
        text: String,
    },
    /// No strategy recognized the output with confidence; the raw text is
    /// carried through unparsed.
    Fallback {
        /// The raw text, unparsed.
        text: String,
    },
}

/// The result of parsing one raw model turn.
///
/// Parsing never fails fatally: every input produces a `ParseOutcome`, with
/// `confidence` reflecting how much the parser trusts the result rather
/// than an error channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// The parsed shape.
    pub variant: OutcomeVariant,
    /// Confidence in `[0, 1]` that `variant` reflects the model's intent.
    pub confidence: f64,
    /// The raw text this outcome was parsed from.
    pub raw: String,
}

impl ParseOutcome {
    /// Construct an outcome, clamping `confidence` into `[0, 1]`.
    pub fn new(variant: OutcomeVariant, confidence: f64, raw: impl Into<String>) -> Self {
        Self {
            variant,
            confidence: confidence.clamp(0.0, 1.0),
            raw: raw.into(),
        }
    }

    /// Whether this outcome is a tool call.
    pub fn is_tool_call(&self) -> bool {
        matches!(self.variant, OutcomeVariant::ToolCall { .. })
    }

    /// Whether this outcome is a final answer.
    pub fn is_final_answer(&self) -> bool {
        matches!(self.variant, OutcomeVariant::FinalAnswer { .. })
    }

    /// Whether this outcome is an unparsed fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self.variant, OutcomeVariant::Fallback { .. })
    }
}
