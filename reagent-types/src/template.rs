//! Per-variant rendering rules consumed by the prompt composer.

use std::collections::BTreeMap;

use crate::value::Value;

/// A single demonstration turn shown to the model as a few-shot example.
#[derive(Debug, Clone, PartialEq)]
pub struct Exemplar {
    /// The user query this exemplar answers.
    pub query: String,
    /// The modeled reasoning step.
    pub thought: String,
    /// The tool invoked, if any.
    pub action: String,
    /// The tool's arguments.
    pub action_input: BTreeMap<String, Value>,
    /// The observation returned by the tool.
    pub observation: String,
    /// The final answer produced after the observation.
    pub final_answer: String,
}

impl Exemplar {
    /// Construct an exemplar from its parts.
    pub fn new(
        query: impl Into<String>,
        thought: impl Into<String>,
        action: impl Into<String>,
        action_input: BTreeMap<String, Value>,
        observation: impl Into<String>,
        final_answer: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            thought: thought.into(),
            action: action.into(),
            action_input,
            observation: observation.into(),
            final_answer: final_answer.into(),
        }
    }
}

/// Prefixes used for each line of the reason-act-observe grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarPrefixes {
    /// Prefix for the reasoning line, e.g. `"Thought:"`.
    pub thought: String,
    /// Prefix for the tool-name line, e.g. `"Action:"`.
    pub action: String,
    /// Prefix for the arguments line, e.g. `"Action Input:"`.
    pub action_input: String,
    /// Prefix for an injected tool result, e.g. `"Observation:"`.
    pub observation: String,
    /// Prefix for a terminal answer, e.g. `"Final Answer:"`.
    pub final_answer: String,
}

impl Default for GrammarPrefixes {
    fn default() -> Self {
        Self {
            thought: "Thought:".to_string(),
            action: "Action:".to_string(),
            action_input: "Action Input:".to_string(),
            observation: "Observation:".to_string(),
            final_answer: "Final Answer:".to_string(),
        }
    }
}

/// Per-variant rendering rules, selected from a [`crate::model::VariantTag`]
/// and held immutable for the life of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    /// System instruction prefixed ahead of everything else.
    pub system_prompt: String,
    /// Line prefixes for the output grammar.
    pub prefixes: GrammarPrefixes,
    /// Whether `Action Input` must be a fenced JSON object (`true`) or a
    /// `k=v, k=v` line (`false`).
    pub json_delimiters: bool,
    /// Whether the grammar section should spell out a stricter, more
    /// verbose set of formatting rules.
    pub strict_formatting: bool,
    /// Few-shot demonstration turns, in priority order (earlier entries are
    /// kept longest when the composer trims for budget).
    pub few_shot: Vec<Exemplar>,
}

impl PromptTemplate {
    /// The template tuned for Phi-family models: the "I will use the X
    /// tool" idiom reads naturally to them, so exemplars lean on it.
    pub fn phi() -> Self {
        Self {
            system_prompt: "You are a precise assistant that reasons step by step and uses tools when needed.".to_string(),
            prefixes: GrammarPrefixes::default(),
            json_delimiters: true,
            strict_formatting: true,
            few_shot: vec![Exemplar::new(
                "What is the weather in Paris?",
                "I need to check the current weather for Paris.",
                "get_weather",
                BTreeMap::from([
                    ("location".to_string(), Value::String("Paris".to_string())),
                    ("units".to_string(), Value::String("celsius".to_string())),
                ]),
                "18 degrees celsius, partly cloudy",
                "The weather in Paris is 18 degrees celsius and partly cloudy.",
            )],
        }
    }

    /// The template tuned for Gemma-family models: terser prefixes, no
    /// strict-formatting verbosity, `k=v` arguments by default.
    pub fn gemma() -> Self {
        Self {
            system_prompt: "You are a helpful assistant. Think step by step, then act.".to_string(),
            prefixes: GrammarPrefixes::default(),
            json_delimiters: false,
            strict_formatting: false,
            few_shot: vec![Exemplar::new(
                "Convert 10 miles to kilometers.",
                "This needs a unit conversion.",
                "convert_units",
                BTreeMap::from([
                    ("value".to_string(), Value::Number(10.0)),
                    ("from".to_string(), Value::String("miles".to_string())),
                    ("to".to_string(), Value::String("kilometers".to_string())),
                ]),
                "16.09",
                "10 miles is about 16.09 kilometers.",
            )],
        }
    }

    /// The fallback template used when no known variant prefix matches the
    /// model identifier.
    pub fn default_variant() -> Self {
        Self {
            system_prompt: "You are a helpful assistant with access to tools.".to_string(),
            prefixes: GrammarPrefixes::default(),
            json_delimiters: true,
            strict_formatting: false,
            few_shot: vec![Exemplar::new(
                "What is 2 plus 2?",
                "This is simple arithmetic; no tool is required.",
                String::new(),
                BTreeMap::new(),
                String::new(),
                "2 plus 2 is 4.",
            )],
        }
    }
}
