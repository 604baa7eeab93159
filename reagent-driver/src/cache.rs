//! A bounded LRU [`ResponseCache`] with TTL-on-read.
//!
//! Grounded on `sven-image`'s `LruCache` behind a `Mutex`, but deliberately
//! not a process-wide static: the core has no host process of its own, so
//! a cache is something a caller constructs and owns for one session (or
//! shares across sessions that want it), not a singleton the crate reaches
//! for on its own.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use reagent_types::ParseOutcome;
use tokio::sync::Mutex;

use crate::capability::ResponseCache;

struct Entry {
    outcome: ParseOutcome,
    expires_at: Instant,
}

/// A bounded, thread-safe cache of [`ParseOutcome`]s keyed by
/// [`crate::hash::cache_key`].
///
/// Expiry is checked lazily on [`BoundedCache::get`] rather than swept
/// proactively — an expired entry simply counts as a miss and is evicted at
/// that point, instead of a background task.
pub struct BoundedCache {
    entries: Mutex<LruCache<String, Entry>>,
    ttl: Duration,
}

impl BoundedCache {
    /// Build a cache holding at most `capacity` entries, each valid for
    /// `ttl` after being stored.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }
}

#[async_trait]
impl ResponseCache for BoundedCache {
    async fn get(&self, key: &str) -> Option<ParseOutcome> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.outcome.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: &str, outcome: ParseOutcome) {
        let mut entries = self.entries.lock().await;
        entries.put(
            key.to_string(),
            Entry {
                outcome,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}
