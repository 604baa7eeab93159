//! `ToolSpec` and `ToolCatalogue` — the declared tools a model may invoke.

use crate::error::CatalogueError;
use std::collections::HashSet;

/// A declared tool the model may invoke.
///
/// `schema` is opaque to the core — it is passed through to the Composer
/// for rendering and to the caller's tool dispatcher for validation, but
/// the core never inspects its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    /// The tool's unique identifier within its catalogue.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: String,
    /// Opaque parameter shape (typically a JSON Schema object).
    pub schema: serde_json::Value,
}

impl ToolSpec {
    /// Construct a new tool declaration.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }
}

/// Ordered, unique-by-name collection of [`ToolSpec`]s.
///
/// Immutable once built — the uniqueness invariant (tool names within a
/// catalogue are unique) is enforced once, at construction, rather than
/// re-checked by every consumer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCatalogue {
    tools: Vec<ToolSpec>,
}

impl ToolCatalogue {
    /// Build a catalogue from an ordered list of tools.
    ///
    /// Iteration order in [`ToolCatalogue::iter`] matches the order passed
    /// here — the Composer's `## Available Tools` section depends on it.
    pub fn new(tools: Vec<ToolSpec>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::with_capacity(tools.len());
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(CatalogueError::DuplicateName(tool.name.clone()));
            }
        }
        Ok(Self { tools })
    }

    /// An empty catalogue.
    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Iterate tools in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolSpec> {
        self.tools.iter()
    }

    /// Number of declared tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalogue declares no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Names of all declared tools, in catalogue order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }
}
