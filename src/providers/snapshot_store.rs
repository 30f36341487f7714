//! Snapshot storage trait.

use crate::error::Result;
use crate::state::DocumentSnapshot;
use std::future::Future;

/// Durable storage for mirrored [`DocumentSnapshot`] rows.
///
/// The sync engine is the only writer; the lifecycle machine only reads.
/// Upsert is the sole mutation, so overlapping sync runs can at worst
/// rewrite a row with the same or a newer version, never corrupt it.
pub trait SnapshotStore: Send + Sync {
    /// List all stored (key, version) pairs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Database`] if the listing fails.
    fn list_versions(&self) -> impl Future<Output = Result<Vec<(String, String)>>> + Send;

    /// Fetch the snapshot for an object key, if one has been mirrored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Database`] if the lookup fails.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<DocumentSnapshot>>> + Send;

    /// Insert-or-replace the snapshot row keyed by object key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Database`] if the write fails.
    fn upsert(&self, snapshot: &DocumentSnapshot) -> impl Future<Output = Result<()>> + Send;
}
