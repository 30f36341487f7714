//! PostgreSQL request store implementation.

use crate::error::{DocgateError, Result};
use crate::providers::RequestStore;
use crate::state::{DocumentRequest, RequestId, RequestStatus};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL-backed [`RequestStore`].
///
/// One row per request in `document_requests`, keyed by identifier, with
/// columns for kind, email, name and status. The migration additionally
/// carries a partial unique index over (email, kind) for `REQUESTED`
/// rows, closing the check-then-insert race at the storage layer.
#[derive(Clone)]
pub struct PostgresRequestStore {
    /// PostgreSQL connection pool.
    pool: PgPool,
}

impl PostgresRequestStore {
    /// Create a new PostgreSQL request store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns error if migrations fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DocgateError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }
}

impl RequestStore for PostgresRequestStore {
    async fn find_requested(
        &self,
        requester_email: &str,
        document_kind: &str,
    ) -> Result<Option<RequestId>> {
        let row = sqlx::query(
            r"
            SELECT id
            FROM document_requests
            WHERE requester_email = $1 AND document_kind = $2 AND status = 'REQUESTED'
            ",
        )
        .bind(requester_email)
        .bind(document_kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DocgateError::Database(format!("Failed to check for open request: {e}")))?;

        row.map(|r| {
            r.try_get::<Uuid, _>("id")
                .map(RequestId)
                .map_err(|e| DocgateError::Database(format!("Failed to read request id: {e}")))
        })
        .transpose()
    }

    async fn insert(&self, request: &DocumentRequest) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO document_requests
                (id, document_kind, requester_email, requester_name, status)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(request.id.0)
        .bind(&request.document_kind)
        .bind(&request.requester_email)
        .bind(&request.requester_name)
        .bind(request.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DocgateError::Database(format!("Failed to insert request: {e}")))?;

        Ok(())
    }

    async fn get(&self, id: RequestId) -> Result<Option<DocumentRequest>> {
        let row = sqlx::query(
            r"
            SELECT document_kind, requester_email, requester_name, status
            FROM document_requests
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DocgateError::Database(format!("Failed to get request: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw_status: String = row
            .try_get("status")
            .map_err(|e| DocgateError::Database(format!("Failed to read status: {e}")))?;

        Ok(Some(DocumentRequest {
            id,
            document_kind: row
                .try_get("document_kind")
                .map_err(|e| DocgateError::Database(format!("Failed to read kind: {e}")))?,
            requester_email: row
                .try_get("requester_email")
                .map_err(|e| DocgateError::Database(format!("Failed to read email: {e}")))?,
            requester_name: row
                .try_get("requester_name")
                .map_err(|e| DocgateError::Database(format!("Failed to read name: {e}")))?,
            // A status outside the enum surfaces as InconsistentState.
            status: RequestStatus::parse(&raw_status)?,
        }))
    }

    async fn set_status(&self, id: RequestId, status: RequestStatus) -> Result<()> {
        let result = sqlx::query(
            r"
            UPDATE document_requests
            SET status = $2
            WHERE id = $1
            ",
        )
        .bind(id.0)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DocgateError::Database(format!("Failed to update status: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DocgateError::Database(format!(
                "Status update for {id} affected no rows"
            )));
        }

        Ok(())
    }
}
