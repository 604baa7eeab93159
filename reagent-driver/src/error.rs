//! The driver's error taxonomy: only two variants ever escape a session,
//! per §7 — everything else (tool errors, parser/judge non-errors) is
//! recovered locally and folded into an observation.

use thiserror::Error;

/// Errors that terminate a [`crate::driver::Driver::run`] call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DriverError {
    /// The caller's deadline was exceeded at a suspension point
    /// (`generate`, tool `call`, or a backoff wait).
    #[error("cancelled: deadline exceeded")]
    Cancelled,

    /// A non-transient `generate` error, or a transient one whose retries
    /// were exhausted.
    #[error("backend error: {0}")]
    BackendFatal(String),
}
