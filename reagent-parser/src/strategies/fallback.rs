//! Strategy #7: the cascade's backstop. Always matches.

use reagent_types::{ModelProfile, OutcomeVariant, ParseOutcome};

use crate::strategy::Strategy;

const CONFIDENCE: f64 = 0.30;

/// Never declines. Normalizes whitespace and hands the text back as a
/// [`OutcomeVariant::Fallback`] so the driver knows no strategy trusted it.
pub struct Fallback;

impl Strategy for Fallback {
    fn try_parse(&self, raw: &str, _profile: &ModelProfile) -> Option<ParseOutcome> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        Some(ParseOutcome::new(
            OutcomeVariant::Fallback { text: normalized },
            CONFIDENCE,
            raw,
        ))
    }
}
