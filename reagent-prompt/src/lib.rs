#![deny(missing_docs)]
//! Assembles a single model-specific prompt from a [`ModelProfile`], a
//! [`PromptTemplate`], a tool catalogue, and the running conversation.
//!
//! [`ModelProfile`]: reagent_types::ModelProfile
//! [`PromptTemplate`]: reagent_types::PromptTemplate

pub mod compose;
pub mod select;

pub use compose::{render, RenderedPrompt};
pub use select::select_template;
