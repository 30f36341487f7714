//! Mock operator notifier for testing.

use crate::error::{DocgateError, Result};
use crate::providers::OperatorNotifier;
use crate::state::RequestId;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A recorded operator notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Request the notification is about.
    pub request_id: RequestId,

    /// Document kind named in the notification.
    pub document_kind: String,

    /// Accept action link carried on the notification.
    pub accept_url: String,

    /// Reject action link carried on the notification.
    pub reject_url: String,
}

/// Mock operator notifier.
///
/// Records notifications instead of pushing them, with a failure toggle
/// for proving that a failed notification never fails a create.
#[derive(Debug, Clone, Default)]
pub struct MockOperatorNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockOperatorNotifier {
    /// Create a mock notifier that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent notification fail.
    pub fn fail_notifications(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// All recorded notifications, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl OperatorNotifier for MockOperatorNotifier {
    fn notify_request(
        &self,
        request_id: RequestId,
        document_kind: &str,
        _message: &str,
        accept_url: &str,
        reject_url: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let notifications = Arc::clone(&self.notifications);
        let should_fail = self.should_fail.load(Ordering::SeqCst);
        let notification = Notification {
            request_id,
            document_kind: document_kind.to_string(),
            accept_url: accept_url.to_string(),
            reject_url: reject_url.to_string(),
        };

        async move {
            if should_fail {
                return Err(DocgateError::Notification(
                    "notify failed (requested by test)".to_string(),
                ));
            }

            notifications
                .lock()
                .map_err(|_| DocgateError::Notification("mock notifier lock poisoned".to_string()))?
                .push(notification);
            Ok(())
        }
    }
}
