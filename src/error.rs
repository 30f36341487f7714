//! Error types for the document-release workflow.

use thiserror::Error;

/// Result type alias for document-release operations.
pub type Result<T> = std::result::Result<T, DocgateError>;

/// Error taxonomy for the request lifecycle and snapshot sync.
///
/// Every failure mode of Create/Accept/Reject/Sync is represented here and
/// recovered at the operation boundary; nothing escapes as an unhandled
/// fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocgateError {
    // ═══════════════════════════════════════════════════════════
    // Caller Errors
    // ═══════════════════════════════════════════════════════════

    /// Requester fields failed validation.
    #[error("Validation failed: {reason}")]
    Validation {
        /// What was wrong with the input
        reason: String,
    },

    /// The document kind has no config entry.
    #[error("\"{kind}\" is not a supported document")]
    UnsupportedDocument {
        /// The unmapped document kind
        kind: String,
    },

    /// No request record backs the supplied identifier (or it is not a
    /// well-formed identifier at all).
    #[error("No document request found for \"{id}\"")]
    NotFound {
        /// The identifier as supplied by the caller
        id: String,
    },

    /// The request already sits in a terminal state that conflicts with
    /// the attempted action.
    #[error("Request {id} is already {current}, cannot {attempted}")]
    InvalidTransition {
        /// Request identifier
        id: String,
        /// The terminal status the record already holds
        current: String,
        /// The action that was refused
        attempted: String,
    },

    /// Too many requests inside the current rate window.
    #[error("Rate limit exceeded for \"{key}\"")]
    TooManyRequests {
        /// The rate key that tripped the limit
        key: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Server Errors
    // ═══════════════════════════════════════════════════════════

    /// The mirrored snapshot is missing or empty. Recoverable by running
    /// a sync and retrying; never by retrying the accept alone.
    #[error("No usable snapshot for object key \"{key}\", has it been synced?")]
    DocumentUnavailable {
        /// The object-store key the config mapped the request to
        key: String,
    },

    /// A stored value is outside the expected set, or a presumed
    /// unreachable path was reached. Alerting, never coerced.
    #[error("Inconsistent stored state: {detail}")]
    InconsistentState {
        /// What was observed
        detail: String,
    },

    /// The email was already dispatched but the terminal status write
    /// failed. Requires manual reconciliation; an automatic retry risks a
    /// duplicate email.
    #[error("Status update for {id} failed after email dispatch")]
    PostSendPersistFailure {
        /// Request identifier needing reconciliation
        id: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Infrastructure Carriers
    // ═══════════════════════════════════════════════════════════

    /// Relational store operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Object store operation failed.
    #[error("Object store error: {0}")]
    ObjectStore(String),

    /// Email dispatch failed.
    #[error("Email error: {0}")]
    Email(String),

    /// Operator notification failed.
    #[error("Notification error: {0}")]
    Notification(String),
}

impl DocgateError {
    /// Returns `true` if this error is due to invalid caller input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use docgate::DocgateError;
    /// assert!(DocgateError::UnsupportedDocument { kind: "poem".into() }.is_user_error());
    /// assert!(!DocgateError::Database("boom".into()).is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::UnsupportedDocument { .. }
                | Self::NotFound { .. }
                | Self::InvalidTransition { .. }
                | Self::TooManyRequests { .. }
        )
    }

    /// Returns `true` if this error cannot be retried automatically and
    /// needs an operator to reconcile state by hand.
    ///
    /// # Examples
    ///
    /// ```
    /// # use docgate::DocgateError;
    /// assert!(DocgateError::PostSendPersistFailure { id: "abc".into() }.requires_manual_reconciliation());
    /// assert!(!DocgateError::DocumentUnavailable { key: "resume.pdf".into() }.requires_manual_reconciliation());
    /// ```
    #[must_use]
    pub const fn requires_manual_reconciliation(&self) -> bool {
        matches!(
            self,
            Self::PostSendPersistFailure { .. } | Self::InconsistentState { .. }
        )
    }
}
