//! Workflow environment.
//!
//! This module defines the environment type for dependency injection
//! into the lifecycle machine and the sync engine.

use crate::config::DocumentConfig;
use crate::providers::{
    EmailSender, ObjectStore, OperatorNotifier, RateLimiter, RequestStore, SnapshotStore,
};
use std::sync::Arc;

/// Workflow environment.
///
/// Bundles every external collaborator the core calls, plus the immutable
/// document config. Providers are cheap to clone (pool- or `Arc`-backed),
/// so the environment itself is `Clone` and shared freely across
/// concurrent operations.
///
/// # Type Parameters
///
/// - `O`: Object store
/// - `E`: Email sender
/// - `N`: Operator notifier
/// - `Q`: Request store
/// - `S`: Snapshot store
/// - `L`: Rate limiter
#[derive(Clone)]
pub struct ReleaseEnvironment<O, E, N, Q, S, L>
where
    O: ObjectStore + Clone,
    E: EmailSender + Clone,
    N: OperatorNotifier + Clone,
    Q: RequestStore + Clone,
    S: SnapshotStore + Clone,
    L: RateLimiter + Clone,
{
    /// Object store holding the source documents.
    pub objects: O,

    /// Email sender.
    pub email: E,

    /// Operator notification channel.
    pub notifier: N,

    /// Request record storage.
    pub requests: Q,

    /// Mirrored snapshot storage.
    pub snapshots: S,

    /// Rate limiter guarding request creation.
    pub rate_limiter: L,

    /// Static kind → document mapping. Immutable process-wide; safe to
    /// read without synchronization.
    pub config: Arc<DocumentConfig>,
}

impl<O, E, N, Q, S, L> ReleaseEnvironment<O, E, N, Q, S, L>
where
    O: ObjectStore + Clone,
    E: EmailSender + Clone,
    N: OperatorNotifier + Clone,
    Q: RequestStore + Clone,
    S: SnapshotStore + Clone,
    L: RateLimiter + Clone,
{
    /// Create a new workflow environment.
    #[must_use]
    pub fn new(
        objects: O,
        email: E,
        notifier: N,
        requests: Q,
        snapshots: S,
        rate_limiter: L,
        config: Arc<DocumentConfig>,
    ) -> Self {
        Self {
            objects,
            email,
            notifier,
            requests,
            snapshots,
            rate_limiter,
            config,
        }
    }
}
