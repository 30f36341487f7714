//! Mock email sender for testing.

use crate::error::{DocgateError, Result};
use crate::providers::{Attachment, EmailSender};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A recorded outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient address.
    pub to: String,

    /// Template identifier used.
    pub template: String,

    /// Attachment file name, if one was carried.
    pub attachment_filename: Option<String>,
}

/// Mock email sender.
///
/// Records every send instead of delivering, and can be switched into a
/// failing mode. Failed sends are still recorded: the provider was
/// invoked and may well have queued something before reporting failure,
/// which is exactly why the lifecycle machine never retries them.
#[derive(Debug, Clone, Default)]
pub struct MockEmailSender {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockEmailSender {
    /// Create a mock sender that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// All recorded sends, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of send calls observed.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn record(&self, email: SentEmail) -> Result<()> {
        self.sent
            .lock()
            .map_err(|_| DocgateError::Email("mock sender lock poisoned".to_string()))?
            .push(email);

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DocgateError::Email(
                "send failed (requested by test)".to_string(),
            ));
        }
        Ok(())
    }
}

impl EmailSender for MockEmailSender {
    fn send_document(
        &self,
        to: &str,
        _recipient_name: &str,
        template: &str,
        attachment: Attachment,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let email = SentEmail {
            to: to.to_string(),
            template: template.to_string(),
            attachment_filename: Some(attachment.filename),
        };

        async move { this.record(email) }
    }

    fn send_rejection(
        &self,
        to: &str,
        _recipient_name: &str,
        template: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let this = self.clone();
        let email = SentEmail {
            to: to.to_string(),
            template: template.to_string(),
            attachment_filename: None,
        };

        async move { this.record(email) }
    }
}
