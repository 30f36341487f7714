//! Mock object store for testing.

use crate::error::{DocgateError, Result};
use crate::providers::{ObjectListing, ObjectStore};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Mock object store.
///
/// In-memory objects keyed by name, with explicit version tokens.
/// Individual keys can be poisoned so that they list fine but fail to
/// fetch, reproducing an object vanishing between listing and get.
#[derive(Debug, Clone, Default)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<String, (String, Vec<u8>)>>>,
    unfetchable: Arc<Mutex<HashSet<String>>>,
    vanished: Arc<Mutex<HashSet<String>>>,
}

impl MockObjectStore {
    /// Create an empty mock object store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an object with an explicit version token.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn put(&self, key: impl Into<String>, version: impl Into<String>, content: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.into(), (version.into(), content.to_vec()));
    }

    /// Remove an object entirely.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn remove(&self, key: &str) {
        self.objects.lock().unwrap().remove(key);
    }

    /// Keep the object listed but make `get` fail for it.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn poison(&self, key: impl Into<String>) {
        self.unfetchable.lock().unwrap().insert(key.into());
    }

    /// Keep the object listed but make `get` return absent, as if it
    /// vanished between listing and fetch.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[allow(clippy::unwrap_used)]
    pub fn vanish(&self, key: impl Into<String>) {
        self.vanished.lock().unwrap().insert(key.into());
    }
}

impl ObjectStore for MockObjectStore {
    fn list(&self) -> impl Future<Output = Result<Vec<ObjectListing>>> + Send {
        let objects = Arc::clone(&self.objects);

        async move {
            let guard = objects.lock().map_err(|_| lock_error())?;
            Ok(guard
                .iter()
                .map(|(key, (version, _))| ObjectListing {
                    key: key.clone(),
                    version: version.clone(),
                })
                .collect())
        }
    }

    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        let objects = Arc::clone(&self.objects);
        let unfetchable = Arc::clone(&self.unfetchable);
        let vanished = Arc::clone(&self.vanished);
        let key = key.to_string();

        async move {
            if unfetchable.lock().map_err(|_| lock_error())?.contains(&key) {
                return Err(DocgateError::ObjectStore(format!(
                    "fetch failed for \"{key}\" (requested by test)"
                )));
            }
            if vanished.lock().map_err(|_| lock_error())?.contains(&key) {
                return Ok(None);
            }

            Ok(objects
                .lock()
                .map_err(|_| lock_error())?
                .get(&key)
                .map(|(_, content)| content.clone()))
        }
    }
}

fn lock_error() -> DocgateError {
    DocgateError::ObjectStore("mock store lock poisoned".to_string())
}
