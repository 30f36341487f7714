//! Mock request store for testing.

use crate::error::{DocgateError, Result};
use crate::providers::RequestStore;
use crate::state::{DocumentRequest, RequestId, RequestStatus};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock request store.
///
/// Uses in-memory storage. Reproduces the check-then-insert duplicate
/// prevention of the real store (no uniqueness constraint), and can be
/// told to fail status updates to exercise the post-send persistence
/// failure path.
#[derive(Debug, Clone, Default)]
pub struct MockRequestStore {
    records: Arc<Mutex<HashMap<RequestId, DocumentRequest>>>,
    fail_status_updates: Arc<AtomicBool>,
}

impl MockRequestStore {
    /// Create an empty mock request store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_status` call fail.
    pub fn fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all stored records, for assertions.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn records(&self) -> Vec<DocumentRequest> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    /// Seed a record directly, bypassing the lifecycle machine.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn seed(&self, request: DocumentRequest) {
        self.records.lock().unwrap().insert(request.id, request);
    }
}

impl RequestStore for MockRequestStore {
    fn find_requested(
        &self,
        requester_email: &str,
        document_kind: &str,
    ) -> impl Future<Output = Result<Option<RequestId>>> + Send {
        let records = Arc::clone(&self.records);
        let email = requester_email.to_string();
        let kind = document_kind.to_string();

        async move {
            let guard = records.lock().map_err(|_| lock_error())?;
            Ok(guard
                .values()
                .find(|r| {
                    r.requester_email == email
                        && r.document_kind == kind
                        && r.status == RequestStatus::Requested
                })
                .map(|r| r.id))
        }
    }

    fn insert(&self, request: &DocumentRequest) -> impl Future<Output = Result<()>> + Send {
        let records = Arc::clone(&self.records);
        let request = request.clone();

        async move {
            records
                .lock()
                .map_err(|_| lock_error())?
                .insert(request.id, request);
            Ok(())
        }
    }

    fn get(&self, id: RequestId) -> impl Future<Output = Result<Option<DocumentRequest>>> + Send {
        let records = Arc::clone(&self.records);

        async move { Ok(records.lock().map_err(|_| lock_error())?.get(&id).cloned()) }
    }

    fn set_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> impl Future<Output = Result<()>> + Send {
        let records = Arc::clone(&self.records);
        let fail = self.fail_status_updates.load(Ordering::SeqCst);

        async move {
            if fail {
                return Err(DocgateError::Database(
                    "status update failed (requested by test)".to_string(),
                ));
            }

            let mut guard = records.lock().map_err(|_| lock_error())?;
            match guard.get_mut(&id) {
                Some(record) => {
                    record.status = status;
                    Ok(())
                }
                None => Err(DocgateError::Database(
                    "update affected no rows".to_string(),
                )),
            }
        }
    }
}

fn lock_error() -> DocgateError {
    DocgateError::Database("mock store lock poisoned".to_string())
}
