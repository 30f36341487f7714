//! Snapshot sync engine.
//!
//! Mirrors object-store contents into the relational snapshot table so
//! that accepting a request never touches the object store inline. The
//! request path has a tight per-request compute budget; reading a large
//! binary and base64-encoding it there is exactly the work this engine
//! moves onto its own schedule.
//!
//! Sync is reconciliation, not replay: it lists both sides, syncs every
//! object whose key is unmirrored or whose version differs, and leaves
//! snapshots of since-deleted objects in place (accepted staleness). Each
//! object syncs independently and concurrently; one failure never blocks
//! or fails the others, and the next scheduled run self-heals whatever
//! this one missed.

use crate::error::Result;
use crate::providers::{ObjectListing, ObjectStore, SnapshotStore};
use crate::state::DocumentSnapshot;
use base64::Engine;
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;

/// Per-object outcome of a sync attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The snapshot row now carries this version.
    Synced {
        /// Version token recorded on the snapshot
        version: String,
    },

    /// This object could not be mirrored; captured, not thrown.
    Failed {
        /// Why the object failed to sync
        reason: String,
    },
}

/// Outcome for one attempted object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectSyncResult {
    /// Object key.
    pub key: String,

    /// What happened.
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

/// Aggregate report over every object attempted in one run.
///
/// A run with some failed objects is degraded, not failed — partial
/// failure never surfaces as an aggregate fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SyncReport {
    /// Per-object results, one entry per attempted object.
    pub results: Vec<ObjectSyncResult>,
}

impl SyncReport {
    /// Number of objects mirrored this run.
    #[must_use]
    pub fn synced_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, SyncOutcome::Synced { .. }))
            .count()
    }

    /// Number of objects that failed this run.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.synced_count()
    }
}

/// The sync engine.
///
/// Runs independently of the request path, typically on a fixed schedule.
/// Safe to run concurrently with itself and with in-flight accepts:
/// upsert is the only mutation, so the worst effect of overlap is a
/// redundant rewrite with the same or a newer version.
#[derive(Clone)]
pub struct SyncEngine<O, S>
where
    O: ObjectStore + Clone,
    S: SnapshotStore + Clone,
{
    objects: O,
    snapshots: S,
}

impl<O, S> SyncEngine<O, S>
where
    O: ObjectStore + Clone,
    S: SnapshotStore + Clone,
{
    /// Create a sync engine over an object store and a snapshot store.
    #[must_use]
    pub const fn new(objects: O, snapshots: S) -> Self {
        Self { objects, snapshots }
    }

    /// Reconcile the object store into the snapshot store.
    ///
    /// # Errors
    ///
    /// Returns an error only if one of the two listings fails. Per-object
    /// fetch/encode/upsert failures are reported inside the
    /// [`SyncReport`], never raised.
    pub async fn sync(&self) -> Result<SyncReport> {
        let listed = self.objects.list().await?;
        let mirrored: HashMap<String, String> =
            self.snapshots.list_versions().await?.into_iter().collect();

        let needing_sync: Vec<ObjectListing> = listed
            .into_iter()
            .filter(|o| mirrored.get(&o.key) != Some(&o.version))
            .collect();

        tracing::info!("attempting to sync {} objects", needing_sync.len());

        let results = join_all(needing_sync.into_iter().map(|o| self.sync_object(o))).await;

        for result in &results {
            if let SyncOutcome::Failed { reason } = &result.outcome {
                tracing::error!(key = %result.key, "failed to sync object: {reason}");
            }
        }
        tracing::info!("syncing complete");

        Ok(SyncReport { results })
    }

    /// Sync a single object. Failures are captured as values so one slow
    /// or broken object never cancels its siblings.
    async fn sync_object(&self, object: ObjectListing) -> ObjectSyncResult {
        tracing::info!(key = %object.key, "beginning sync");

        let bytes = match self.objects.get(&object.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                // Listed a moment ago, gone now. The next run will settle it.
                return ObjectSyncResult {
                    key: object.key,
                    outcome: SyncOutcome::Failed {
                        reason: "object listed but missing from the object store".to_string(),
                    },
                };
            }
            Err(e) => {
                return ObjectSyncResult {
                    key: object.key,
                    outcome: SyncOutcome::Failed {
                        reason: e.to_string(),
                    },
                };
            }
        };

        let snapshot = DocumentSnapshot {
            key: object.key.clone(),
            version: object.version.clone(),
            content_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
            updated_at: Utc::now(),
        };

        match self.snapshots.upsert(&snapshot).await {
            Ok(()) => {
                tracing::info!(key = %object.key, version = %object.version, "finished sync");
                ObjectSyncResult {
                    key: object.key,
                    outcome: SyncOutcome::Synced {
                        version: object.version,
                    },
                }
            }
            Err(e) => ObjectSyncResult {
                key: object.key,
                outcome: SyncOutcome::Failed {
                    reason: e.to_string(),
                },
            },
        }
    }

    /// Run [`Self::sync`] forever on a fixed period.
    ///
    /// A failed run is logged and the loop keeps going; the whole design
    /// assumes flaky syncs clean themselves up on the next tick.
    pub async fn run_every(&self, period: std::time::Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.sync().await {
                Ok(report) => tracing::info!(
                    synced = report.synced_count(),
                    failed = report.failed_count(),
                    "scheduled sync finished"
                ),
                Err(e) => tracing::error!("scheduled sync failed: {e}"),
            }
        }
    }
}
