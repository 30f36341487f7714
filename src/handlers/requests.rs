//! Request lifecycle handlers: create, accept, reject.

use crate::environment::ReleaseEnvironment;
use crate::handlers::{ApiError, StatusResponse};
use crate::lifecycle::RequestLifecycle;
use crate::providers::{
    EmailSender, ObjectStore, OperatorNotifier, RateLimiter, RequestStore, SnapshotStore,
};
use crate::utils::{validate_email, validate_requester_name};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

/// Body of a create-request call.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestBody {
    /// Requester's email address.
    pub email: String,

    /// Requester's display name.
    pub name: String,
}

/// Create a document request.
///
/// # Endpoint
///
/// ```text
/// POST /requests/{document_kind}
/// Content-Type: application/json
///
/// {"email": "a@x.com", "name": "Alice"}
/// ```
///
/// Returns 202 with `{"status": "accepted"}` whether a record was
/// inserted or an open one already existed.
///
/// # Errors
///
/// 400 for invalid fields or an unsupported kind, 429 when the caller is
/// over budget, 500 for store failures.
pub async fn create<O, E, N, Q, S, L>(
    State(env): State<ReleaseEnvironment<O, E, N, Q, S, L>>,
    Path(document_kind): Path<String>,
    Json(body): Json<CreateRequestBody>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError>
where
    O: ObjectStore + Clone + 'static,
    E: EmailSender + Clone + 'static,
    N: OperatorNotifier + Clone + 'static,
    Q: RequestStore + Clone + 'static,
    S: SnapshotStore + Clone + 'static,
    L: RateLimiter + Clone + 'static,
{
    validate_email(&body.email)?;
    validate_requester_name(&body.name)?;
    env.rate_limiter.check(&body.email).await?;

    RequestLifecycle::new(env)
        .create(&document_kind, &body.email, &body.name)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(StatusResponse::accepted())))
}

/// Accept a request, releasing the document by email.
///
/// # Endpoint
///
/// ```text
/// PUT /accept/{request_id}
/// ```
///
/// ntfy action buttons fire this with PUT; keep the method stable.
///
/// # Errors
///
/// 404 for malformed/unknown ids, 409 if already rejected, 500 for the
/// server-side failure kinds.
pub async fn accept<O, E, N, Q, S, L>(
    State(env): State<ReleaseEnvironment<O, E, N, Q, S, L>>,
    Path(request_id): Path<String>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError>
where
    O: ObjectStore + Clone + 'static,
    E: EmailSender + Clone + 'static,
    N: OperatorNotifier + Clone + 'static,
    Q: RequestStore + Clone + 'static,
    S: SnapshotStore + Clone + 'static,
    L: RateLimiter + Clone + 'static,
{
    RequestLifecycle::new(env).accept(&request_id).await?;
    Ok((StatusCode::ACCEPTED, Json(StatusResponse::accepted())))
}

/// Reject a request with the generic rejection email.
///
/// # Endpoint
///
/// ```text
/// PUT /reject/{request_id}
/// ```
///
/// # Errors
///
/// 404 for malformed/unknown ids, 409 if already accepted, 500 for the
/// server-side failure kinds.
pub async fn reject<O, E, N, Q, S, L>(
    State(env): State<ReleaseEnvironment<O, E, N, Q, S, L>>,
    Path(request_id): Path<String>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError>
where
    O: ObjectStore + Clone + 'static,
    E: EmailSender + Clone + 'static,
    N: OperatorNotifier + Clone + 'static,
    Q: RequestStore + Clone + 'static,
    S: SnapshotStore + Clone + 'static,
    L: RateLimiter + Clone + 'static,
{
    RequestLifecycle::new(env).reject(&request_id).await?;
    Ok((StatusCode::ACCEPTED, Json(StatusResponse::accepted())))
}
