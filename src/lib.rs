//! # Docgate
//!
//! A small document-release workflow: a requester asks for a named
//! document by email, an operator is notified and accepts or rejects the
//! request, and on acceptance the document is emailed as an attachment.
//!
//! ## Architecture
//!
//! Two core components sit behind a thin HTTP surface:
//!
//! - **Request lifecycle state machine** ([`lifecycle`]): owns the
//!   `REQUESTED` → `ACCEPTED`/`REJECTED` transitions, orchestrates email
//!   dispatch and persistence, and keeps transitions idempotent under
//!   retries and partial failure.
//! - **Sync engine** ([`sync`]): periodically mirrors object-store blobs
//!   into the relational store as base64 snapshots, so accepting a
//!   request never reads or encodes a large binary inline.
//!
//! Every external collaborator — object store, relational stores, email
//! sender, operator notifier, rate limiter — is a trait in [`providers`],
//! with production implementations alongside and in [`stores`], and
//! in-memory doubles in [`mocks`] (feature `test-utils`).
//!
//! ## Example
//!
//! ```rust,ignore
//! use docgate::{release_router, ReleaseEnvironment, SyncEngine};
//!
//! let env = ReleaseEnvironment::new(/* providers */);
//! let app = release_router(env.clone());
//! tokio::spawn(async move {
//!     SyncEngine::new(env.objects, env.snapshots)
//!         .run_every(Duration::from_secs(900))
//!         .await;
//! });
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod config;
pub mod environment;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod providers;
pub mod router;
pub mod state;
pub mod stores;
pub mod sync;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use config::{DocumentConfig, DocumentEntry};
pub use environment::ReleaseEnvironment;
pub use error::{DocgateError, Result};
pub use lifecycle::{CreateOutcome, RequestLifecycle, TransitionOutcome};
pub use router::release_router;
pub use state::{DocumentRequest, DocumentSnapshot, RequestId, RequestStatus};
pub use sync::{ObjectSyncResult, SyncEngine, SyncOutcome, SyncReport};
