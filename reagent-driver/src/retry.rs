//! Generation retry/backoff: classifies backend errors by substring and
//! retries transient ones with exponential backoff, honoring the caller's
//! cancellation deadline mid-backoff.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::capability::{Backend, GenerateResponse};
use crate::error::DriverError;

/// Maximum number of retry attempts after the initial call.
pub const MAX_RETRIES: u32 = 3;
/// Initial backoff delay, doubled after each retry.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
/// Per-`generate` call timeout, independent of the overall deadline.
pub const PER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Substrings (case-insensitive) that classify a `generate` error as
/// transient and therefore worth retrying.
const TRANSIENT_MARKERS: &[&str] = &["timeout", "connection", "temporary", "rate limit"];

/// Whether `message` names a transient backend failure.
pub fn is_transient(message: &str) -> bool {
    let lower = message.to_lowercase();
    TRANSIENT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Call `backend.generate`, retrying transient errors with exponential
/// backoff up to [`MAX_RETRIES`] attempts. Each individual call is bounded
/// by [`PER_REQUEST_TIMEOUT`]; the whole retry loop is bounded by
/// `deadline`, which a mid-backoff cancellation observes and surfaces as
/// [`DriverError::Cancelled`] rather than retrying past it.
#[allow(clippy::too_many_arguments)]
pub async fn generate_with_retry(
    backend: &dyn Backend,
    prompt: &str,
    stop: &[String],
    temperature: f64,
    max_tokens: u32,
    deadline: Instant,
) -> Result<GenerateResponse, DriverError> {
    let mut attempt: u32 = 0;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        if Instant::now() >= deadline {
            return Err(DriverError::Cancelled);
        }

        let per_request_deadline = earliest(deadline, Instant::now() + PER_REQUEST_TIMEOUT);
        let remaining = per_request_deadline.saturating_duration_since(Instant::now());

        let outcome = match tokio::time::timeout(
            remaining,
            backend.generate(prompt, stop, temperature, max_tokens, per_request_deadline),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err("timeout: request exceeded per-request deadline".to_string()),
        };

        let message = match outcome {
            Ok(response) => return Ok(response),
            Err(message) => message,
        };

        attempt += 1;
        if attempt > MAX_RETRIES || !is_transient(&message) {
            return Err(DriverError::BackendFatal(message));
        }

        warn!(attempt, backoff_ms = backoff.as_millis() as u64, error = %message, "transient backend error, retrying");

        if Instant::now() + backoff >= deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            tokio::time::sleep(remaining).await;
            return Err(DriverError::Cancelled);
        }

        tokio::time::sleep(backoff).await;
        backoff *= 2;
    }
}

pub(crate) fn earliest(a: Instant, b: Instant) -> Instant {
    if a < b {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_transient_substrings_case_insensitively() {
        assert!(is_transient("Connection reset by peer"));
        assert!(is_transient("RATE LIMIT exceeded"));
        assert!(is_transient("temporary failure in name resolution"));
        assert!(is_transient("request timeout"));
    }

    #[test]
    fn non_transient_errors_are_not_retried() {
        assert!(!is_transient("invalid api key"));
        assert!(!is_transient("model not found"));
    }

    #[tokio::test]
    async fn succeeds_immediately_without_retry() {
        struct AlwaysOk;
        #[async_trait::async_trait]
        impl Backend for AlwaysOk {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<GenerateResponse, String> {
                Ok(GenerateResponse::text("hi"))
            }
        }

        let deadline = Instant::now() + Duration::from_secs(5);
        let response = generate_with_retry(&AlwaysOk, "prompt", &[], 0.5, 128, deadline)
            .await
            .unwrap();
        assert_eq!(response.text, "hi");
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        use std::sync::atomic::{AtomicU32, Ordering};

        struct FlakyThenOk {
            calls: AtomicU32,
        }
        #[async_trait::async_trait]
        impl Backend for FlakyThenOk {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<GenerateResponse, String> {
                if self.calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err("connection reset".to_string())
                } else {
                    Ok(GenerateResponse::text("recovered"))
                }
            }
        }

        let backend = FlakyThenOk { calls: AtomicU32::new(0) };
        let deadline = Instant::now() + Duration::from_secs(5);
        let response = generate_with_retry(&backend, "prompt", &[], 0.5, 128, deadline)
            .await
            .unwrap();
        assert_eq!(response.text, "recovered");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_transient_error_is_fatal_without_retry() {
        struct AlwaysAuthError;
        #[async_trait::async_trait]
        impl Backend for AlwaysAuthError {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<GenerateResponse, String> {
                Err("invalid api key".to_string())
            }
        }

        let deadline = Instant::now() + Duration::from_secs(5);
        let err = generate_with_retry(&AlwaysAuthError, "prompt", &[], 0.5, 128, deadline)
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::BackendFatal(_)));
    }

    #[tokio::test]
    async fn exhausted_retries_become_backend_fatal() {
        struct AlwaysTransient;
        #[async_trait::async_trait]
        impl Backend for AlwaysTransient {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<GenerateResponse, String> {
                Err("timeout".to_string())
            }
        }

        let deadline = Instant::now() + Duration::from_secs(5);
        let err = generate_with_retry(&AlwaysTransient, "prompt", &[], 0.5, 128, deadline)
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::BackendFatal(_)));
    }

    #[tokio::test]
    async fn cancellation_during_backoff_returns_immediately() {
        struct AlwaysTransient;
        #[async_trait::async_trait]
        impl Backend for AlwaysTransient {
            async fn generate(
                &self,
                _prompt: &str,
                _stop: &[String],
                _temperature: f64,
                _max_tokens: u32,
                _deadline: Instant,
            ) -> Result<GenerateResponse, String> {
                Err("connection error".to_string())
            }
        }

        let deadline = Instant::now() + Duration::from_millis(50);
        let err = generate_with_retry(&AlwaysTransient, "prompt", &[], 0.5, 128, deadline)
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::Cancelled));
    }
}
