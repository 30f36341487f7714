//! Mock rate limiter for testing.

use crate::error::{DocgateError, Result};
use crate::providers::RateLimiter;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Mock rate limiter.
///
/// Allows everything by default; flip it to reject every check.
#[derive(Debug, Clone, Default)]
pub struct MockRateLimiter {
    should_reject: Arc<AtomicBool>,
}

impl MockRateLimiter {
    /// Create a mock limiter that allows everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent check fail with `TooManyRequests`.
    pub fn reject_all(&self, reject: bool) {
        self.should_reject.store(reject, Ordering::SeqCst);
    }
}

impl RateLimiter for MockRateLimiter {
    fn check(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        let reject = self.should_reject.load(Ordering::SeqCst);
        let key = key.to_string();

        async move {
            if reject {
                return Err(DocgateError::TooManyRequests { key });
            }
            Ok(())
        }
    }
}
