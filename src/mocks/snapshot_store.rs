//! Mock snapshot store for testing.

use crate::error::{DocgateError, Result};
use crate::providers::SnapshotStore;
use crate::state::DocumentSnapshot;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock snapshot store.
///
/// In-memory rows keyed by object key, plus an upsert counter so tests
/// can prove that an idempotent second sync run writes nothing.
#[derive(Debug, Clone, Default)]
pub struct MockSnapshotStore {
    rows: Arc<Mutex<HashMap<String, DocumentSnapshot>>>,
    upserts: Arc<AtomicUsize>,
}

impl MockSnapshotStore {
    /// Create an empty mock snapshot store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of upsert calls observed.
    #[must_use]
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    /// Fetch a stored row synchronously, for assertions.
    ///
    /// # Panics
    ///
    /// Panics if no row exists for `key` or the internal lock is
    /// poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used, clippy::panic)]
    pub fn get_row(&self, key: &str) -> DocumentSnapshot {
        self.rows
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_else(|| panic!("no snapshot row for {key}"))
    }

    /// Seed a snapshot row directly, bypassing the sync engine.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn seed(&self, snapshot: DocumentSnapshot) {
        self.rows
            .lock()
            .unwrap()
            .insert(snapshot.key.clone(), snapshot);
    }
}

impl SnapshotStore for MockSnapshotStore {
    fn list_versions(&self) -> impl Future<Output = Result<Vec<(String, String)>>> + Send {
        let rows = Arc::clone(&self.rows);

        async move {
            let guard = rows.lock().map_err(|_| lock_error())?;
            Ok(guard
                .values()
                .map(|s| (s.key.clone(), s.version.clone()))
                .collect())
        }
    }

    fn get(&self, key: &str) -> impl Future<Output = Result<Option<DocumentSnapshot>>> + Send {
        let rows = Arc::clone(&self.rows);
        let key = key.to_string();

        async move { Ok(rows.lock().map_err(|_| lock_error())?.get(&key).cloned()) }
    }

    fn upsert(&self, snapshot: &DocumentSnapshot) -> impl Future<Output = Result<()>> + Send {
        let rows = Arc::clone(&self.rows);
        let upserts = Arc::clone(&self.upserts);
        let snapshot = snapshot.clone();

        async move {
            upserts.fetch_add(1, Ordering::SeqCst);
            rows.lock()
                .map_err(|_| lock_error())?
                .insert(snapshot.key.clone(), snapshot);
            Ok(())
        }
    }
}

fn lock_error() -> DocgateError {
    DocgateError::Database("mock store lock poisoned".to_string())
}
