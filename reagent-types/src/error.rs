//! Error types owned by the data model itself.
//!
//! Parsing and judging are infallible by contract and so define no error
//! type of their own; the one fallible operation at this layer is building
//! a [`crate::ToolCatalogue`] from a tool list that violates the uniqueness
//! invariant.

use thiserror::Error;

/// Errors constructing a [`crate::ToolCatalogue`].
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogueError {
    /// Two or more tools declared the same name.
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),
}
