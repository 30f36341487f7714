//! Request lifecycle state machine.
//!
//! Owns the `REQUESTED` → `ACCEPTED`/`REJECTED` transitions. Accept and
//! reject read the mirrored snapshot from the relational store — never
//! the object store — so the request path stays within its compute
//! budget; the sync engine keeps the mirror fresh off-path.
//!
//! Side effects (email, operator notification) are fire-and-forget: the
//! machine observes only success or failure of the call and never
//! attempts a compensating transaction. "Email sent but status update
//! failed" is surfaced as its own error kind for manual reconciliation
//! instead of being retried, because the email cannot be unsent.

use crate::environment::ReleaseEnvironment;
use crate::error::{DocgateError, Result};
use crate::providers::{
    Attachment, EmailSender, ObjectStore, OperatorNotifier, RateLimiter, RequestStore,
    SnapshotStore,
};
use crate::state::{DocumentRequest, RequestId, RequestStatus};

/// Outcome of a create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new record was inserted and the operator notified.
    Created(RequestId),

    /// A `REQUESTED` record already existed for this (email, kind);
    /// nothing was inserted.
    AlreadyRequested(RequestId),
}

impl CreateOutcome {
    /// The identifier of the live request, whether fresh or pre-existing.
    #[must_use]
    pub const fn request_id(self) -> RequestId {
        match self {
            Self::Created(id) | Self::AlreadyRequested(id) => id,
        }
    }
}

/// Outcome of an accept or reject call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition ran: email dispatched, terminal status persisted.
    Applied,

    /// The record already held the requested terminal state. No email was
    /// sent, nothing was written.
    AlreadyApplied,
}

/// The request lifecycle state machine.
///
/// Cheap to construct from a cloned environment; each inbound operation
/// executes as an independent, unordered unit of work with no in-process
/// locking. Concurrency correctness leans entirely on the request store's
/// per-row atomicity for its single update statement.
#[derive(Clone)]
pub struct RequestLifecycle<O, E, N, Q, S, L>
where
    O: ObjectStore + Clone,
    E: EmailSender + Clone,
    N: OperatorNotifier + Clone,
    Q: RequestStore + Clone,
    S: SnapshotStore + Clone,
    L: RateLimiter + Clone,
{
    env: ReleaseEnvironment<O, E, N, Q, S, L>,
}

impl<O, E, N, Q, S, L> RequestLifecycle<O, E, N, Q, S, L>
where
    O: ObjectStore + Clone,
    E: EmailSender + Clone,
    N: OperatorNotifier + Clone,
    Q: RequestStore + Clone,
    S: SnapshotStore + Clone,
    L: RateLimiter + Clone,
{
    /// Create a lifecycle machine over the given environment.
    #[must_use]
    pub const fn new(env: ReleaseEnvironment<O, E, N, Q, S, L>) -> Self {
        Self { env }
    }

    /// Create a document request.
    ///
    /// Field validation (email shape, non-trivial name) happens in the
    /// calling layer; this operation only re-checks that the kind maps to
    /// a config entry. If a `REQUESTED` record already exists for this
    /// (email, kind) pair, the call succeeds without inserting a
    /// duplicate. Operator-notification failure is logged, never fatal.
    ///
    /// # Errors
    ///
    /// - [`DocgateError::UnsupportedDocument`] for an unmapped kind
    /// - [`DocgateError::Database`] if the existence check or insert fails
    pub async fn create(
        &self,
        document_kind: &str,
        requester_email: &str,
        requester_name: &str,
    ) -> Result<CreateOutcome> {
        if !self.env.config.supports(document_kind) {
            return Err(DocgateError::UnsupportedDocument {
                kind: document_kind.to_string(),
            });
        }

        if let Some(existing) = self
            .env
            .requests
            .find_requested(requester_email, document_kind)
            .await?
        {
            tracing::info!(
                request_id = %existing,
                kind = document_kind,
                email = requester_email,
                "request already exists in the requested state, stopping"
            );
            return Ok(CreateOutcome::AlreadyRequested(existing));
        }

        let request = DocumentRequest::new(
            document_kind.to_string(),
            requester_email.to_string(),
            requester_name.to_string(),
        );
        self.env.requests.insert(&request).await?;

        tracing::info!(
            request_id = %request.id,
            kind = document_kind,
            "created document request"
        );

        let message =
            format!("{requester_name}({requester_email}) has requested access to \"{document_kind}\"");
        let accept_url = self.env.config.accept_url(&request.id.to_string());
        let reject_url = self.env.config.reject_url(&request.id.to_string());

        if let Err(e) = self
            .env
            .notifier
            .notify_request(request.id, document_kind, &message, &accept_url, &reject_url)
            .await
        {
            // The record is already durable; the operator can still find
            // it out-of-band, so the insert is not rolled back.
            tracing::error!(
                request_id = %request.id,
                kind = document_kind,
                "operator notification failed: {e}"
            );
        }

        Ok(CreateOutcome::Created(request.id))
    }

    /// Accept a request: email the document, persist `ACCEPTED`.
    ///
    /// # Errors
    ///
    /// - [`DocgateError::NotFound`] for a malformed or unknown identifier
    /// - [`DocgateError::InvalidTransition`] if the record is `REJECTED`
    /// - [`DocgateError::InconsistentState`] for a stored status or kind
    ///   outside the expected set
    /// - [`DocgateError::DocumentUnavailable`] if no usable snapshot is
    ///   mirrored (recoverable: run a sync, then retry)
    /// - [`DocgateError::PostSendPersistFailure`] if the status write
    ///   fails after the email was attempted (manual reconciliation)
    pub async fn accept(&self, raw_id: &str) -> Result<TransitionOutcome> {
        let (id, request) = self.load(raw_id).await?;

        // Status checks run in a fixed order: rejected, accepted, then
        // requested. The response for every stored status value depends
        // on this ordering.
        match request.status {
            RequestStatus::Rejected => {
                return Err(DocgateError::InvalidTransition {
                    id: id.to_string(),
                    current: RequestStatus::Rejected.to_string(),
                    attempted: "accept".to_string(),
                })
            }
            RequestStatus::Accepted => return Ok(TransitionOutcome::AlreadyApplied),
            RequestStatus::Requested => {}
        }

        let Some(entry) = self.env.config.entry(&request.document_kind) else {
            // A stored kind with no config entry should be unreachable;
            // creation re-checks the mapping.
            tracing::error!(
                request_id = %id,
                kind = %request.document_kind,
                "no config entry for stored document kind"
            );
            return Err(DocgateError::InconsistentState {
                detail: format!(
                    "no config entry for stored document kind \"{}\"",
                    request.document_kind
                ),
            });
        };

        let snapshot = self.env.snapshots.get(&entry.object_key).await?;
        let Some(snapshot) = snapshot.filter(|s| !s.content_base64.is_empty()) else {
            tracing::error!(
                request_id = %id,
                kind = %request.document_kind,
                key = %entry.object_key,
                "no mirrored snapshot for object, has it been synced?"
            );
            return Err(DocgateError::DocumentUnavailable {
                key: entry.object_key.clone(),
            });
        };

        tracing::info!(
            key = %snapshot.key,
            version = %snapshot.version,
            updated_at = %snapshot.updated_at,
            "sending mirrored document"
        );

        let attachment = Attachment {
            filename: entry.object_key.clone(),
            content_type: entry.content_type.clone(),
            content_base64: snapshot.content_base64,
        };

        // A failed send is logged but does not abort the transition;
        // flipping the status anyway beats leaving the request stuck for
        // the requester to re-trigger a human workflow.
        match self
            .env
            .email
            .send_document(
                &request.requester_email,
                &request.requester_name,
                &entry.template,
                attachment,
            )
            .await
        {
            Ok(()) => tracing::info!(request_id = %id, "successfully sent document email"),
            Err(e) => tracing::error!(request_id = %id, "document email failed: {e}"),
        }

        self.persist_terminal(id, RequestStatus::Accepted).await?;
        Ok(TransitionOutcome::Applied)
    }

    /// Reject a request: send the generic rejection email, persist
    /// `REJECTED`.
    ///
    /// # Errors
    ///
    /// Mirror of [`Self::accept`]: `NotFound` for malformed/unknown ids,
    /// [`DocgateError::InvalidTransition`] if the record is `ACCEPTED`,
    /// no-op success if already `REJECTED`, and the same
    /// [`DocgateError::PostSendPersistFailure`] semantics.
    pub async fn reject(&self, raw_id: &str) -> Result<TransitionOutcome> {
        let (id, request) = self.load(raw_id).await?;

        match request.status {
            RequestStatus::Rejected => return Ok(TransitionOutcome::AlreadyApplied),
            RequestStatus::Accepted => {
                return Err(DocgateError::InvalidTransition {
                    id: id.to_string(),
                    current: RequestStatus::Accepted.to_string(),
                    attempted: "reject".to_string(),
                })
            }
            RequestStatus::Requested => {}
        }

        match self
            .env
            .email
            .send_rejection(
                &request.requester_email,
                &request.requester_name,
                &self.env.config.rejection_template,
            )
            .await
        {
            Ok(()) => tracing::info!(request_id = %id, "successfully sent rejection email"),
            Err(e) => tracing::error!(request_id = %id, "rejection email failed: {e}"),
        }

        self.persist_terminal(id, RequestStatus::Rejected).await?;
        Ok(TransitionOutcome::Applied)
    }

    /// Parse the caller-supplied identifier and load its record.
    async fn load(&self, raw_id: &str) -> Result<(RequestId, DocumentRequest)> {
        let id = RequestId::parse(raw_id)?;
        let request = self
            .env
            .requests
            .get(id)
            .await?
            .ok_or_else(|| DocgateError::NotFound {
                id: raw_id.to_string(),
            })?;
        Ok((id, request))
    }

    /// Write the terminal status. The email has already been attempted by
    /// the time this runs, so a failure here is the
    /// manual-reconciliation case.
    async fn persist_terminal(&self, id: RequestId, status: RequestStatus) -> Result<()> {
        if let Err(e) = self.env.requests.set_status(id, status).await {
            tracing::error!(
                request_id = %id,
                status = %status,
                "status update failed after email dispatch, manual intervention required: {e}"
            );
            return Err(DocgateError::PostSendPersistFailure { id: id.to_string() });
        }
        Ok(())
    }
}
