//! Collaborator contracts consumed by the workflow core.
//!
//! This module defines traits for every external dependency the lifecycle
//! machine and the sync engine call: the object store, the relational
//! stores, the email sender, the operator notifier and the rate limiter.
//! Providers are **interfaces**, not implementations — the core depends
//! on these traits, and the embedding application wires the concrete
//! implementations (or the mocks, in tests).

pub mod email;
pub mod fs_object_store;
pub mod ntfy;
pub mod object_store;
pub mod rate_limiter;
pub mod request_store;
pub mod smtp_email;
pub mod snapshot_store;

pub use email::{Attachment, EmailSender};
pub use fs_object_store::FsObjectStore;
pub use ntfy::NtfyNotifier;
pub use object_store::{ObjectListing, ObjectStore};
pub use rate_limiter::{FixedWindowLimiter, RateLimiter};
pub use request_store::RequestStore;
pub use smtp_email::SmtpEmailSender;
pub use snapshot_store::SnapshotStore;

use crate::error::Result;
use crate::state::RequestId;
use std::future::Future;

/// Operator notification channel.
///
/// Informs a human that a document request needs a decision, carrying the
/// action links that drive the accept/reject transitions. Fire-and-forget:
/// a failed notification is logged by the caller and never rolls back the
/// request insert.
pub trait OperatorNotifier: Send + Sync {
    /// Notify the operator of a new request.
    ///
    /// # Arguments
    ///
    /// - `request_id`: Identifier of the freshly created request
    /// - `document_kind`: What was asked for
    /// - `message`: Human-readable summary line
    /// - `accept_url` / `reject_url`: Action links for the decision
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Notification`] if delivery fails.
    fn notify_request(
        &self,
        request_id: RequestId,
        document_kind: &str,
        message: &str,
        accept_url: &str,
        reject_url: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}
