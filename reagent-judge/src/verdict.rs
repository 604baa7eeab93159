//! The judge's output: a pass/fail verdict plus a one-line diagnostic.

/// The result of judging one [`reagent_types::ParseOutcome`] against an
/// [`reagent_types::ExpectedOutcome`].
///
/// The judge never errors — every call produces a `Verdict`, with
/// `diagnostic` identifying which rule passed or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the actual outcome satisfied the expectation.
    pub pass: bool,
    /// A one-line explanation of which rule decided the verdict.
    pub diagnostic: String,
}

impl Verdict {
    /// A passing verdict with the given diagnostic.
    pub fn pass(diagnostic: impl Into<String>) -> Self {
        Self {
            pass: true,
            diagnostic: diagnostic.into(),
        }
    }

    /// A failing verdict with the given diagnostic.
    pub fn fail(diagnostic: impl Into<String>) -> Self {
        Self {
            pass: false,
            diagnostic: diagnostic.into(),
        }
    }
}
