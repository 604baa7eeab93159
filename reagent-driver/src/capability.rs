//! The three pluggable capabilities the driver borrows rather than owns:
//! the model backend, the tool dispatcher, and (optionally) a response
//! cache.
//!
//! All three are object-safe `async_trait`s, following `layer0`'s
//! `StateReader`/`Hook` pattern, rather than RPITIT — unlike the teacher's
//! `Provider` trait, the driver needs to accept whichever concrete
//! implementation the embedding application constructs at runtime, so
//! `Arc<dyn Backend>` must be possible.

use std::time::Instant;

use async_trait::async_trait;
use reagent_types::{ActionInput, ParseOutcome};

/// What a [`Backend::generate`] call returns on success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    /// The model's raw text for this turn.
    pub text: String,
    /// Tokens counted in the prompt, if the backend reports them.
    pub prompt_tokens: Option<u64>,
    /// Tokens counted in the completion, if the backend reports them.
    pub completion_tokens: Option<u64>,
    /// Total tokens, if the backend reports them.
    pub total_tokens: Option<u64>,
}

impl GenerateResponse {
    /// Construct a response carrying only text, with no usage reported.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// The model backend capability.
///
/// Errors are opaque strings per §6 — the driver classifies them only by
/// substring (see [`crate::retry::is_transient`]), never by matching a
/// structured error type. This keeps the core decoupled from any specific
/// transport.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Generate a completion for `prompt`, stopping at any of `stop`.
    async fn generate(
        &self,
        prompt: &str,
        stop: &[String],
        temperature: f64,
        max_tokens: u32,
        deadline: Instant,
    ) -> Result<GenerateResponse, String>;
}

/// The tool dispatcher capability.
///
/// Dispatcher errors are never fatal to a session — the driver folds them
/// into an observation (`Tool error: <message>`) and continues.
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Invoke `name` with `args`, returning its result text verbatim (to be
    /// injected as observation content) or an error message.
    async fn dispatch(&self, name: &str, args: &ActionInput, deadline: Instant) -> Result<String, String>;
}

/// An optional response cache keyed by [`crate::hash::cache_key`].
///
/// The default implementation is [`crate::cache::BoundedCache`], a
/// bounded LRU with TTL-on-read; callers may substitute their own.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Look up a cached outcome for `key`, or `None` on a miss or a stale
    /// (TTL-expired) hit.
    async fn get(&self, key: &str) -> Option<ParseOutcome>;
    /// Store `outcome` under `key`.
    async fn put(&self, key: &str, outcome: ParseOutcome);
}
