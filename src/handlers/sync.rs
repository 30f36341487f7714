//! Administrative sync handler.

use crate::environment::ReleaseEnvironment;
use crate::handlers::ApiError;
use crate::providers::{
    EmailSender, ObjectStore, OperatorNotifier, RateLimiter, RequestStore, SnapshotStore,
};
use crate::sync::{SyncEngine, SyncReport};
use axum::extract::State;
use axum::Json;

/// Run a sync pass and return the per-object report.
///
/// # Endpoint
///
/// ```text
/// POST /sync
/// ```
///
/// Administrative: intended for trusted callers only — restrict exposure
/// in the embedding application. The scheduled loop makes the same call
/// internally; this endpoint exists to force a pass between ticks (say,
/// right after uploading a new document).
///
/// # Errors
///
/// 500 only if one of the two listings fails; per-object failures are
/// inside the 200 report.
pub async fn sync<O, E, N, Q, S, L>(
    State(env): State<ReleaseEnvironment<O, E, N, Q, S, L>>,
) -> Result<Json<SyncReport>, ApiError>
where
    O: ObjectStore + Clone + 'static,
    E: EmailSender + Clone + 'static,
    N: OperatorNotifier + Clone + 'static,
    Q: RequestStore + Clone + 'static,
    S: SnapshotStore + Clone + 'static,
    L: RateLimiter + Clone + 'static,
{
    let report = SyncEngine::new(env.objects, env.snapshots).sync().await?;
    Ok(Json(report))
}
