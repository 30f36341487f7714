//! Object store trait.

use crate::error::Result;
use std::future::Future;

/// A single listed object: key plus an opaque version token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectListing {
    /// Object key.
    pub key: String,

    /// Version/etag token. Changes whenever the object's content changes;
    /// compared verbatim, never interpreted.
    pub version: String,
}

/// Key-addressable binary blob storage with eventually consistent listing.
///
/// This trait abstracts over blob storage backends (S3-compatible buckets,
/// a local directory, an in-memory map in tests). The sync engine is its
/// only caller on the hot path — the lifecycle machine deliberately reads
/// mirrored snapshots instead.
pub trait ObjectStore: Send + Sync {
    /// List all objects as (key, version) pairs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::ObjectStore`] if the listing fails.
    fn list(&self) -> impl Future<Output = Result<Vec<ObjectListing>>> + Send;

    /// Fetch an object's bytes, or `None` if it does not exist.
    ///
    /// An object can legitimately vanish between a listing and this call;
    /// callers treat `None` as a per-object failure, not a fault.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::ObjectStore`] if the read fails.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;
}
