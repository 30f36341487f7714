//! Request record storage trait.

use crate::error::Result;
use crate::state::{DocumentRequest, RequestId, RequestStatus};
use std::future::Future;

/// Durable storage for [`DocumentRequest`] records.
///
/// Backed by a relational table keyed by identifier with columns for
/// kind, email, name and status. Records are inserted once, have their
/// status updated at most once, and are never deleted.
pub trait RequestStore: Send + Sync {
    /// Find an existing non-terminal (`REQUESTED`) record for this
    /// (email, kind) pair, if any.
    ///
    /// This is the pre-insert existence check that keeps `create`
    /// idempotent by intent. It is a check-then-act, not a constraint;
    /// two concurrent creates can both see `None`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Database`] if the lookup fails.
    fn find_requested(
        &self,
        requester_email: &str,
        document_kind: &str,
    ) -> impl Future<Output = Result<Option<RequestId>>> + Send;

    /// Insert a freshly created record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Database`] if the insert fails.
    fn insert(&self, request: &DocumentRequest) -> impl Future<Output = Result<()>> + Send;

    /// Point lookup by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Database`] if the lookup fails, or
    /// [`crate::DocgateError::InconsistentState`] if the stored status is
    /// outside the expected set.
    fn get(&self, id: RequestId) -> impl Future<Output = Result<Option<DocumentRequest>>> + Send;

    /// Single-row status update.
    ///
    /// Distinguishes "statement failed" from "no rows affected": both are
    /// errors here, because the lifecycle machine only calls this for a
    /// record it just loaded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Database`] if the update fails or
    /// touches no row.
    fn set_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> impl Future<Output = Result<()>> + Send;
}
