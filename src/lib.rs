//! Workspace root crate.
//!
//! This package exists only to host workspace-level integration tests under
//! `tests/`. Library code lives in the member crates (`reagent`,
//! `reagent-types`, `reagent-context`, `reagent-prompt`, `reagent-parser`,
//! `reagent-judge`, `reagent-driver`).
