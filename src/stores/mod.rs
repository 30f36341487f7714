//! Durable store implementations.

pub mod postgres;

pub use postgres::{PostgresRequestStore, PostgresSnapshotStore};
