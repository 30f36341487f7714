//! PostgreSQL snapshot store implementation.

use crate::error::{DocgateError, Result};
use crate::providers::SnapshotStore;
use crate::state::DocumentSnapshot;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

/// PostgreSQL-backed [`SnapshotStore`].
///
/// One row per mirrored object in `document_snapshots`, keyed by object
/// key. Upsert is the only mutation; rows for since-deleted objects are
/// deliberately left in place.
#[derive(Clone)]
pub struct PostgresSnapshotStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresSnapshotStore {
    /// Create a new PostgreSQL snapshot store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SnapshotStore for PostgresSnapshotStore {
    async fn list_versions(&self) -> Result<Vec<(String, String)>> {
        let rows = sqlx::query(
            r"
            SELECT object_key, version
            FROM document_snapshots
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DocgateError::Database(format!("Failed to list snapshots: {e}")))?;

        rows.into_iter()
            .map(|row| {
                let key: String = row
                    .try_get("object_key")
                    .map_err(|e| DocgateError::Database(format!("Failed to read key: {e}")))?;
                let version: String = row
                    .try_get("version")
                    .map_err(|e| DocgateError::Database(format!("Failed to read version: {e}")))?;
                Ok((key, version))
            })
            .collect()
    }

    async fn get(&self, key: &str) -> Result<Option<DocumentSnapshot>> {
        let row = sqlx::query(
            r"
            SELECT version, content_base64, updated_at
            FROM document_snapshots
            WHERE object_key = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DocgateError::Database(format!("Failed to get snapshot: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let version: String = row
            .try_get("version")
            .map_err(|e| DocgateError::Database(format!("Failed to read version: {e}")))?;
        let content_base64: String = row
            .try_get("content_base64")
            .map_err(|e| DocgateError::Database(format!("Failed to read content: {e}")))?;
        let updated_at: DateTime<Utc> = row
            .try_get("updated_at")
            .map_err(|e| DocgateError::Database(format!("Failed to read timestamp: {e}")))?;

        Ok(Some(DocumentSnapshot {
            key: key.to_string(),
            version,
            content_base64,
            updated_at,
        }))
    }

    async fn upsert(&self, snapshot: &DocumentSnapshot) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO document_snapshots
                (object_key, version, content_base64, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (object_key)
            DO UPDATE SET
                version = EXCLUDED.version,
                content_base64 = EXCLUDED.content_base64,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(&snapshot.key)
        .bind(&snapshot.version)
        .bind(&snapshot.content_base64)
        .bind(snapshot.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DocgateError::Database(format!("Failed to upsert snapshot: {e}")))?;

        Ok(())
    }
}
