//! Selects a [`PromptTemplate`] from a model's [`VariantTag`].

use reagent_types::{PromptTemplate, VariantTag};

/// Select the template matching `tag`.
///
/// Deterministic and total: every `VariantTag` maps to exactly one
/// template, so there is no fallible path here — ambiguity was already
/// resolved when the tag itself was derived from the model id.
pub fn select_template(tag: VariantTag) -> PromptTemplate {
    match tag {
        VariantTag::Phi => PromptTemplate::phi(),
        VariantTag::Gemma => PromptTemplate::gemma(),
        VariantTag::Default => PromptTemplate::default_variant(),
    }
}
