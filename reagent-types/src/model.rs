//! `ModelProfile` — per-model tuning knobs, and the `VariantTag` closed enum
//! that drives model-specific prompt and parser behavior.

/// Which family of models (and therefore which prompt template and parsing
/// quirks) applies.
///
/// This is the single place variant dispatch happens — no substring checks
/// scattered across the Composer or Parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantTag {
    /// Phi-family models — recognize the "I will use the X tool" idiom.
    Phi,
    /// Gemma-family models — recognize the bare `identifier: args` idiom.
    Gemma,
    /// Any model not matched by a known prefix.
    Default,
}

/// The system prompt a freshly built [`ModelProfile`] carries until a
/// caller overrides it. The composer treats this exact string as "not
/// overridden" and falls back to the selected template's own instruction.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Fixed, ordered list of `(substring, tag)` pairs checked in order against
/// a lower-cased `model_id`. First match wins — this is what makes variant
/// selection deterministic.
const VARIANT_PREFIXES: &[(&str, VariantTag)] = &[("phi", VariantTag::Phi), ("gemma", VariantTag::Gemma)];

impl VariantTag {
    /// Select a variant tag from a model identifier.
    ///
    /// Matching is a case-insensitive substring check against a fixed order
    /// of known prefixes; no match falls back to [`VariantTag::Default`].
    pub fn detect(model_id: &str) -> VariantTag {
        let lower = model_id.to_lowercase();
        for (prefix, tag) in VARIANT_PREFIXES {
            if lower.contains(prefix) {
                return *tag;
            }
        }
        VariantTag::Default
    }
}

/// Per-model tuning knobs, looked up once per session and held immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    /// Model identifier as passed to the backend.
    pub model_id: String,
    /// Maximum context window size, in estimated tokens.
    pub context_limit: usize,
    /// Tokens reserved for the model's own completion.
    pub reserved_tokens: usize,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling parameter.
    pub top_p: f64,
    /// Top-k sampling parameter.
    pub top_k: u32,
    /// Repetition penalty.
    pub repeat_penalty: f64,
    /// Sequences the backend should stop generation at.
    pub stop_sequences: Vec<String>,
    /// Default system prompt, used unless a template override applies.
    pub default_system_prompt: String,
    /// Which family of models this profile describes.
    pub variant_tag: VariantTag,
}

impl ModelProfile {
    /// Build a profile for `model_id`, deriving `variant_tag` via
    /// [`VariantTag::detect`] and otherwise reasonable defaults.
    pub fn new(model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        let variant_tag = VariantTag::detect(&model_id);
        Self {
            model_id,
            context_limit: 8192,
            reserved_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            repeat_penalty: 1.1,
            stop_sequences: vec!["Observation:".to_string()],
            default_system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            variant_tag,
        }
    }

    /// The token budget available for the rendered prompt: context minus
    /// reserved completion tokens.
    pub fn prompt_budget(&self) -> usize {
        self.context_limit.saturating_sub(self.reserved_tokens)
    }
}
