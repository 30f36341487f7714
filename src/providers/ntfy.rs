//! ntfy.sh operator notifier.

use crate::error::{DocgateError, Result};
use crate::providers::OperatorNotifier;
use crate::state::RequestId;
use serde::Serialize;

/// Push notification payload accepted by the ntfy publish endpoint.
#[derive(Debug, Serialize)]
struct NtfyMessage<'a> {
    topic: &'a str,
    message: &'a str,
    priority: u8,
    tags: &'a [&'a str],
    actions: Vec<NtfyAction<'a>>,
}

/// An HTTP action button rendered on the notification.
#[derive(Debug, Serialize)]
struct NtfyAction<'a> {
    action: &'static str,
    label: &'static str,
    method: &'static str,
    clear: bool,
    url: &'a str,
}

/// Operator notifier publishing to an [ntfy](https://ntfy.sh) topic.
///
/// Each notification carries Accept and Reject action buttons that fire
/// the corresponding lifecycle endpoints directly from the operator's
/// phone. The action endpoints expect PUT.
#[derive(Clone)]
pub struct NtfyNotifier {
    client: reqwest::Client,
    endpoint: String,
    topic: String,
}

impl NtfyNotifier {
    /// Create a notifier publishing to `topic` on the public ntfy server.
    #[must_use]
    pub fn new(topic: String) -> Self {
        Self::with_endpoint("https://ntfy.sh/".to_string(), topic)
    }

    /// Create a notifier against a self-hosted ntfy server.
    #[must_use]
    pub fn with_endpoint(endpoint: String, topic: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            topic,
        }
    }
}

impl OperatorNotifier for NtfyNotifier {
    async fn notify_request(
        &self,
        request_id: RequestId,
        document_kind: &str,
        message: &str,
        accept_url: &str,
        reject_url: &str,
    ) -> Result<()> {
        let payload = NtfyMessage {
            topic: &self.topic,
            message,
            priority: 3,
            tags: &["page_facing_up"],
            actions: vec![
                NtfyAction {
                    action: "http",
                    label: "Accept",
                    method: "PUT",
                    // Removes the notification from the ntfy app after a
                    // successful action.
                    clear: true,
                    url: accept_url,
                },
                NtfyAction {
                    action: "http",
                    label: "Reject",
                    method: "PUT",
                    clear: true,
                    url: reject_url,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                DocgateError::Notification(format!(
                    "publish failed for request {request_id} (\"{document_kind}\"): {e}"
                ))
            })?;

        if !response.status().is_success() {
            return Err(DocgateError::Notification(format!(
                "publish for request {request_id} (\"{document_kind}\") returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
