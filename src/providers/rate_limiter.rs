//! Rate limiter trait and the in-process fixed-window implementation.

use crate::error::{DocgateError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Rate limiter applied to request creation.
///
/// Keys are caller-supplied (requester email or client address). A failed
/// check surfaces as [`DocgateError::TooManyRequests`].
pub trait RateLimiter: Send + Sync {
    /// Record a hit for `key` and fail if the key is over budget.
    ///
    /// # Errors
    ///
    /// Returns [`DocgateError::TooManyRequests`] when the key has
    /// exhausted its window budget.
    fn check(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Fixed-window counter, held in process memory.
///
/// Each key gets `limit` hits per `window`; the counter resets when the
/// window rolls over. No smoothing across window boundaries — the source
/// workflow is human-paced and the budget is generous.
#[derive(Debug, Clone)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    hits: Arc<Mutex<HashMap<String, (DateTime<Utc>, u32)>>>,
}

impl FixedWindowLimiter {
    /// Create a limiter allowing `limit` hits per `window`.
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for FixedWindowLimiter {
    /// 100 hits every 10 minutes. Plenty for a document requester.
    fn default() -> Self {
        Self::new(100, Duration::minutes(10))
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        let hits = Arc::clone(&self.hits);
        let key = key.to_string();
        let limit = self.limit;
        let window = self.window;

        async move {
            let now = Utc::now();
            let mut guard = hits.lock().map_err(|_| {
                DocgateError::InconsistentState {
                    detail: "rate limiter lock poisoned".to_string(),
                }
            })?;

            let entry = guard.entry(key.clone()).or_insert((now, 0));
            if now - entry.0 >= window {
                *entry = (now, 0);
            }

            if entry.1 >= limit {
                return Err(DocgateError::TooManyRequests { key });
            }

            entry.1 += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_the_limit_then_trips() {
        let limiter = FixedWindowLimiter::new(3, Duration::minutes(10));

        for _ in 0..3 {
            limiter.check("a@x.com").await.unwrap();
        }

        let err = limiter.check("a@x.com").await.unwrap_err();
        assert!(matches!(err, DocgateError::TooManyRequests { .. }));

        // Other keys are unaffected.
        limiter.check("b@x.com").await.unwrap();
    }
}
