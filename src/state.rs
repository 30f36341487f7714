//! Domain state: request records and mirrored snapshots.

use crate::error::{DocgateError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a document request.
///
/// Generated once at creation, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DocgateError::NotFound`] if `raw` is not a well-formed
    /// UUID — a malformed identifier can never name a record, and the two
    /// cases are deliberately indistinguishable to the caller.
    pub fn parse(raw: &str) -> Result<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| DocgateError::NotFound { id: raw.to_string() })
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a document request.
///
/// `Requested` is the only non-terminal state. `Accepted` and `Rejected`
/// are terminal and mutually exclusive; once reached, a record never
/// returns to `Requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Awaiting an operator decision.
    Requested,
    /// Operator released the document; email dispatched.
    Accepted,
    /// Operator declined the request.
    Rejected,
}

impl RequestStatus {
    /// Stored representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parse a stored status value.
    ///
    /// # Errors
    ///
    /// Returns [`DocgateError::InconsistentState`] for any value outside
    /// the expected set. An unexpected stored status is an operational
    /// alert, never silently coerced.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "REQUESTED" => Ok(Self::Requested),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(DocgateError::InconsistentState {
                detail: format!("unexpected stored status \"{other}\""),
            }),
        }
    }

    /// Whether this status permits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document request record.
///
/// Created on submission, mutated exactly once by an accept or reject
/// transition, never deleted (audit trail).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Unique identifier.
    pub id: RequestId,

    /// The document kind being requested (config key).
    pub document_kind: String,

    /// Requester's email, captured at creation, immutable thereafter.
    pub requester_email: String,

    /// Requester's display name, captured at creation.
    pub requester_name: String,

    /// Current lifecycle status.
    pub status: RequestStatus,
}

impl DocumentRequest {
    /// Build a fresh record in the `Requested` state.
    #[must_use]
    pub fn new(document_kind: String, requester_email: String, requester_name: String) -> Self {
        Self {
            id: RequestId::generate(),
            document_kind,
            requester_email,
            requester_name,
            status: RequestStatus::Requested,
        }
    }
}

/// A mirrored copy of an object-store blob.
///
/// Written only by the sync engine; read-only to the lifecycle machine.
/// Fresh iff `version` equals the object store's current version for the
/// same key — staleness is detected by comparison, never assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Object-store key this snapshot mirrors.
    pub key: String,

    /// Opaque version token supplied by the object store.
    pub version: String,

    /// Payload, base64-encoded so it is ready to attach to an email
    /// without touching the object store on the request path.
    pub content_base64: String,

    /// When the last successful sync wrote this row.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_form() {
        for status in [
            RequestStatus::Requested,
            RequestStatus::Accepted,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_inconsistent_state() {
        let err = RequestStatus::parse("PENDING").unwrap_err();
        assert!(matches!(err, DocgateError::InconsistentState { .. }));
    }

    #[test]
    fn malformed_request_id_reads_as_not_found() {
        let err = RequestId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, DocgateError::NotFound { .. }));
    }

    #[test]
    fn new_requests_start_requested() {
        let request = DocumentRequest::new(
            "resume".to_string(),
            "a@x.com".to_string(),
            "Alice".to_string(),
        );
        assert_eq!(request.status, RequestStatus::Requested);
        assert!(!request.status.is_terminal());
    }
}
