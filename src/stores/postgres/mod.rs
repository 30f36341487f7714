//! PostgreSQL store implementations.
//!
//! Persistent storage for request records and mirrored snapshots. Uses
//! the sqlx runtime query API so the crate builds without a database
//! connection; schema lives in `migrations/`.

mod request;
mod snapshot;

pub use request::PostgresRequestStore;
pub use snapshot::PostgresSnapshotStore;
