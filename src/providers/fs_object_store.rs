//! Directory-backed object store.

use crate::error::{DocgateError, Result};
use crate::providers::{ObjectListing, ObjectStore};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Object store backed by a local directory.
///
/// Each regular file in the root directory is one object; the file name
/// is the key and the version token is the SHA-256 digest of the file's
/// content, so a rewritten file always lists with a new version.
///
/// Suitable for single-host deployments and development. Listing reads
/// every file to digest it, which is fine at the document counts this
/// workflow serves.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn digest(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        format!("{:x}", hasher.finalize())
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        // Keys are plain file names; anything that resolves outside the
        // root is refused.
        let name = Path::new(key);
        if key.is_empty() || name.components().count() != 1 {
            return Err(DocgateError::ObjectStore(format!(
                "invalid object key \"{key}\""
            )));
        }
        Ok(self.root.join(name))
    }
}

impl ObjectStore for FsObjectStore {
    async fn list(&self) -> Result<Vec<ObjectListing>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| DocgateError::ObjectStore(format!("failed to list objects: {e}")))?;

        let mut listings = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DocgateError::ObjectStore(format!("failed to list objects: {e}")))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| DocgateError::ObjectStore(format!("failed to stat object: {e}")))?;
            if !file_type.is_file() {
                continue;
            }

            let Ok(key) = entry.file_name().into_string() else {
                continue;
            };

            let content = tokio::fs::read(entry.path())
                .await
                .map_err(|e| DocgateError::ObjectStore(format!("failed to read \"{key}\": {e}")))?;

            listings.push(ObjectListing {
                key,
                version: Self::digest(&content),
            });
        }

        Ok(listings)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.object_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DocgateError::ObjectStore(format!(
                "failed to read \"{key}\": {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_files_with_content_versions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("resume.pdf"), b"v1 bytes").unwrap();

        let store = FsObjectStore::new(dir.path());
        let listings = store.list().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].key, "resume.pdf");
        let first_version = listings[0].version.clone();

        // Rewriting the file changes the listed version.
        std::fs::write(dir.path().join("resume.pdf"), b"v2 bytes").unwrap();
        let listings = store.list().await.unwrap();
        assert_ne!(listings[0].version, first_version);
    }

    #[tokio::test]
    async fn get_missing_object_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        assert_eq!(store.get("nope.pdf").await.unwrap(), None);
    }

    #[tokio::test]
    async fn path_escaping_keys_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        assert!(store.get("../secrets.pdf").await.is_err());
    }
}
