//! Driver-wide tuning knobs that are not per-model (those live on
//! [`reagent_types::ModelProfile`]) but govern how the loop itself runs.

use std::time::Duration;

use reagent_types::{ModelProfile, VariantTag};

/// Extra iterations granted when a session's tool catalogue is large
/// enough that the model may need more back-and-forth to find the right
/// tool.
const LARGE_CATALOGUE_THRESHOLD: usize = 5;
const LARGE_CATALOGUE_BONUS: u32 = 2;

/// The base iteration budget for a bare [`VariantTag`], before the
/// large-catalogue bonus. Gemma models get one fewer turn than every other
/// variant.
fn base_iterations(variant: VariantTag) -> u32 {
    match variant {
        VariantTag::Gemma => 4,
        VariantTag::Phi | VariantTag::Default => 5,
    }
}

/// `max_iterations = base(profile) + (tool_count > 5 ? 2 : 0)`, the
/// profile- and catalogue-derived default a [`DriverConfig`] falls back to
/// when `max_iterations` is left unset.
pub fn derive_max_iterations(profile: &ModelProfile, tool_count: usize) -> u32 {
    let bonus = if tool_count > LARGE_CATALOGUE_THRESHOLD { LARGE_CATALOGUE_BONUS } else { 0 };
    base_iterations(profile.variant_tag) + bonus
}

/// Bounds and timeouts for one [`crate::driver::Driver::run`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    /// Maximum reason-act-observe turns before the session terminates with
    /// [`reagent_types::TerminationReason::IterationLimit`].
    ///
    /// `None` (the default) derives the bound from the session's model
    /// profile and tool count via [`derive_max_iterations`] at the start of
    /// each [`crate::driver::Driver::run`] call, per the profile-derived
    /// maximum the session invariants call for. `Some(n)` pins an explicit
    /// override, bypassing derivation entirely — useful for tests and for
    /// callers that want a fixed budget regardless of variant or catalogue
    /// size.
    pub max_iterations: Option<u32>,
    /// Maximum completion tokens requested per `generate` call.
    pub max_tokens: u32,
    /// Disables the parser's natural-language intent heuristics, forwarded
    /// to [`reagent_parser::parse`] verbatim.
    pub strict_mode: bool,
    /// Deadline given to each tool dispatch, measured from the moment the
    /// dispatch is issued.
    pub per_tool_timeout: Duration,
    /// Time-to-live for entries in the default [`crate::cache::BoundedCache`].
    pub cache_ttl: Duration,
    /// Maximum entries held by the default [`crate::cache::BoundedCache`].
    pub cache_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            max_tokens: 512,
            strict_mode: false,
            per_tool_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 128,
        }
    }
}
