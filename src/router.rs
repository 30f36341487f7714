//! Router composition.
//!
//! Composes the workflow handlers into a single Axum router.

use crate::environment::ReleaseEnvironment;
use crate::handlers::{requests, sync};
use crate::providers::{
    EmailSender, ObjectStore, OperatorNotifier, RateLimiter, RequestStore, SnapshotStore,
};
use axum::routing::{post, put};
use axum::Router;

/// Create the document-release router.
///
/// # Routes
///
/// - `POST /requests/:document_kind` — create a request
/// - `PUT /accept/:request_id` — operator accepts; document emailed
/// - `PUT /reject/:request_id` — operator rejects
/// - `POST /sync` — force a snapshot sync pass (administrative)
///
/// # Example
///
/// ```rust,ignore
/// let env = ReleaseEnvironment::new(
///     FsObjectStore::new("/srv/documents"),
///     smtp_sender,
///     NtfyNotifier::new(topic),
///     PostgresRequestStore::new(pool.clone()),
///     PostgresSnapshotStore::new(pool),
///     FixedWindowLimiter::default(),
///     Arc::new(DocumentConfig::default()),
/// );
///
/// let app = Router::new().merge(release_router(env));
/// ```
pub fn release_router<O, E, N, Q, S, L>(env: ReleaseEnvironment<O, E, N, Q, S, L>) -> Router
where
    O: ObjectStore + Clone + 'static,
    E: EmailSender + Clone + 'static,
    N: OperatorNotifier + Clone + 'static,
    Q: RequestStore + Clone + 'static,
    S: SnapshotStore + Clone + 'static,
    L: RateLimiter + Clone + 'static,
{
    Router::new()
        .route(
            "/requests/:document_kind",
            post(requests::create::<O, E, N, Q, S, L>),
        )
        .route(
            "/accept/:request_id",
            put(requests::accept::<O, E, N, Q, S, L>),
        )
        .route(
            "/reject/:request_id",
            put(requests::reject::<O, E, N, Q, S, L>),
        )
        .route("/sync", post(sync::sync::<O, E, N, Q, S, L>))
        .with_state(env)
}
