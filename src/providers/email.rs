//! Email sender trait.

use crate::error::Result;
use std::future::Future;

/// An attachment carried on a document-release email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient (the object-store key).
    pub filename: String,

    /// Declared MIME type, from the document config.
    pub content_type: String,

    /// Payload, base64-encoded exactly as mirrored in the snapshot row.
    pub content_base64: String,
}

/// Outbound email delivery.
///
/// This trait abstracts over delivery services (SMTP relays, SendGrid,
/// SES, a console printer in development). Delivery is fire-and-forget
/// from the lifecycle machine's point of view: a non-success result is
/// logged, never allowed to abort a state transition.
pub trait EmailSender: Send + Sync {
    /// Send the released document to the requester.
    ///
    /// # Arguments
    ///
    /// - `to`: Requester's email address
    /// - `recipient_name`: Requester's name, for the template
    /// - `template`: Template identifier from the document config
    /// - `attachment`: The mirrored document
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Email`] if the send fails.
    fn send_document(
        &self,
        to: &str,
        recipient_name: &str,
        template: &str,
        attachment: Attachment,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Send the generic rejection email. No attachment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocgateError::Email`] if the send fails.
    fn send_rejection(
        &self,
        to: &str,
        recipient_name: &str,
        template: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}
