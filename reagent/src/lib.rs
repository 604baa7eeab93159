#![deny(missing_docs)]
//! # reagent — umbrella crate
//!
//! A single import surface for the tool-calling orchestration substrate:
//! the Prompt Composer, Multi-Strategy Parser, Reason-Act-Observe Driver,
//! and Evaluation Judge. Re-exports each sub-crate behind a feature flag,
//! plus a [`prelude`] for the happy path.

#[cfg(feature = "core")]
pub use reagent_context;
#[cfg(feature = "core")]
pub use reagent_prompt;
#[cfg(feature = "core")]
pub use reagent_types;

#[cfg(feature = "core")]
pub use reagent_parser;

#[cfg(feature = "driver")]
pub use reagent_driver;

#[cfg(feature = "judge")]
pub use reagent_judge;

/// Happy-path imports for composing a reason-act-observe session.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use reagent_types::{
        ActionInput, CatalogueError, Exemplar, ExpectedOutcome, GrammarPrefixes, Message,
        ModelProfile, OutcomeVariant, ParseOutcome, PromptTemplate, Role, SessionState,
        TerminationReason, ToolCatalogue, ToolSpec, Value, VariantTag,
    };

    #[cfg(feature = "core")]
    pub use reagent_context::{estimate_tokens, ContextCompressor};

    #[cfg(feature = "core")]
    pub use reagent_prompt::{render, select_template, RenderedPrompt};

    #[cfg(feature = "core")]
    pub use reagent_parser::parse;

    #[cfg(feature = "driver")]
    pub use reagent_driver::{
        derive_max_iterations, Backend, BoundedCache, Driver, DriverConfig, DriverError,
        DriverOutcome, FinishReason, GenerateResponse, ResponseCache, ToolDispatcher,
    };

    #[cfg(feature = "judge")]
    pub use reagent_judge::{judge, Verdict};
}
