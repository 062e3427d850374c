//! Single-slot TTL caching.
//!
//! Every remote resource in this crate is cached independently for a
//! fixed window: a value computed at time T serves all reads until T+TTL,
//! then the next read triggers exactly one recomputation. The slot's lock
//! is held across the refresh, so concurrent readers wait for the
//! in-flight result instead of stampeding the upstream. A failed refresh
//! leaves the previous entry in place and hands the error to the callers
//! that were waiting on it.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Card state is refreshed at most every 240 seconds.
pub const CARD_STATE_TTL: Duration = Duration::from_secs(240);

/// Train progress is refreshed at most every 240 seconds.
pub const TRAIN_PROGRESS_TTL: Duration = Duration::from_secs(240);

/// The shared disruption list is refreshed at most every 60 seconds.
pub const DISRUPTION_TTL: Duration = Duration::from_secs(60);

struct Entry<T> {
    computed_at: Instant,
    value: Arc<T>,
}

/// A one-value cache with time-based invalidation.
pub struct TtlSlot<T> {
    ttl: Duration,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T> TtlSlot<T> {
    /// Create an empty slot whose entries stay valid for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value while it is fresh, otherwise run `fetch`
    /// and store its result.
    ///
    /// The internal lock is held for the duration of `fetch`, so at most
    /// one recomputation is ever in flight; concurrent callers block
    /// until it resolves and then read the freshly stored value. When
    /// `fetch` fails, the slot is left untouched and the error is
    /// returned.
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.computed_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(fetch().await?);
        *slot = Some(Entry {
            computed_at: Instant::now(),
            value: Arc::clone(&value),
        });

        Ok(value)
    }
}
