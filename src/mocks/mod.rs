//! Mock provider implementations for testing.
//!
//! Simple in-memory implementations of every provider trait, with
//! failure toggles and call counters so tests can assert on side effects
//! (emails sent, rows written) as well as on outcomes.

pub mod email;
pub mod notifier;
pub mod object_store;
pub mod rate_limiter;
pub mod request_store;
pub mod snapshot_store;

pub use email::{MockEmailSender, SentEmail};
pub use notifier::MockOperatorNotifier;
pub use object_store::MockObjectStore;
pub use rate_limiter::MockRateLimiter;
pub use request_store::MockRequestStore;
pub use snapshot_store::MockSnapshotStore;
