//! The judge's target: what a test case expects a parsed turn to look like.

use std::collections::BTreeMap;

use crate::value::Value;

/// What a test case expects a [`crate::ParseOutcome`] to look like.
///
/// Authored per test case; the judge never constructs one itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedOutcome {
    /// Expect a tool call, optionally pinning its name and/or a subset of
    /// its arguments.
    ExpectToolCall {
        /// Expected tool name, matched fuzzily. `None` accepts any name.
        name: Option<String>,
        /// Expected argument subset, matched with key-alias and tolerant
        /// value comparison. `None` accepts any arguments.
        args: Option<BTreeMap<String, Value>>,
    },
    /// Expect a final answer, regardless of its text.
    ExpectFinalAnswer,
    /// Accept any outcome shape.
    ExpectAny,
}

impl ExpectedOutcome {
    /// Expect a tool call with no constraint on name or arguments.
    pub fn any_tool_call() -> Self {
        ExpectedOutcome::ExpectToolCall { name: None, args: None }
    }

    /// Expect a tool call with a specific name and no argument constraint.
    pub fn tool_call_named(name: impl Into<String>) -> Self {
        ExpectedOutcome::ExpectToolCall {
            name: Some(name.into()),
            args: None,
        }
    }

    /// Expect a tool call matching both a name and an argument subset.
    pub fn tool_call(name: impl Into<String>, args: BTreeMap<String, Value>) -> Self {
        ExpectedOutcome::ExpectToolCall {
            name: Some(name.into()),
            args: Some(args),
        }
    }
}
