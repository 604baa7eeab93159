//! The strategy contract every cascade member implements.

use reagent_types::{ModelProfile, ParseOutcome};

/// One member of the parsing cascade.
///
/// Each strategy either recognizes its pattern in `raw` and returns a
/// fully-formed [`ParseOutcome`] at its own fixed confidence, or declines
/// by returning `None` so the next strategy gets a turn. A strategy never
/// panics and never partially matches — it's all or nothing.
pub trait Strategy {
    /// Attempt to parse `raw`. `profile` is available for strategies whose
    /// recognition depends on the model variant.
    fn try_parse(&self, raw: &str, profile: &ModelProfile) -> Option<ParseOutcome>;
}
