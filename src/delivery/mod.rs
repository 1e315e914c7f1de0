//! Notification delivery — wire payload, transport seam, validation.

pub mod rest;

pub use rest::RestTransport;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dispatch::{NotificationAction, SEND_NOTIFICATION};
use crate::error::DeliveryError;
use crate::pipeline::types::RoutedNotification;

// ── Wire payload ────────────────────────────────────────────────────

/// Fixed-shape POST body for the notify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyPayload {
    pub recipient: String,
    pub message: String,
    pub channel: String,
    pub is_draft: bool,
}

impl From<&RoutedNotification> for NotifyPayload {
    fn from(routed: &RoutedNotification) -> Self {
        Self {
            recipient: routed.recipient.clone(),
            message: routed.message.clone(),
            channel: routed.channel.clone(),
            is_draft: routed.is_draft,
        }
    }
}

// ── Transport seam ──────────────────────────────────────────────────

/// Transport trait — pure I/O, no validation or routing logic.
///
/// The production implementation is `RestTransport`; tests plug in stubs
/// that record what was (or wasn't) posted.
#[async_trait]
pub trait NotifyTransport: Send + Sync {
    /// Transport name (e.g. "rest").
    fn name(&self) -> &str;

    /// POST the payload exactly once; return the decoded JSON response body.
    async fn post(&self, payload: &NotifyPayload) -> Result<serde_json::Value, DeliveryError>;
}

// ── Notifier ────────────────────────────────────────────────────────

/// Validates and sends notifications through a transport.
///
/// Performs exactly one POST per send — no retry, no backoff, no local
/// timeout policy. Transport failures propagate to the caller.
pub struct Notifier {
    transport: Arc<dyn NotifyTransport>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn NotifyTransport>) -> Self {
        Self { transport }
    }

    /// Validate and send one notification, returning the endpoint's
    /// response verbatim.
    ///
    /// Empty recipient or message fails locally before the transport is
    /// touched (whitespace-only counts as empty).
    pub async fn send(
        &self,
        routed: &RoutedNotification,
    ) -> Result<serde_json::Value, DeliveryError> {
        if routed.recipient.trim().is_empty() {
            return Err(DeliveryError::EmptyField { field: "recipient" });
        }
        if routed.message.trim().is_empty() {
            return Err(DeliveryError::EmptyField { field: "message" });
        }

        let payload = NotifyPayload::from(routed);
        debug!(
            transport = %self.transport.name(),
            recipient = %payload.recipient,
            channel = %payload.channel,
            is_draft = payload.is_draft,
            "Posting notification"
        );
        self.transport.post(&payload).await
    }
}

#[async_trait]
impl NotificationAction for Notifier {
    fn name(&self) -> &str {
        SEND_NOTIFICATION
    }

    async fn run(&self, routed: &RoutedNotification) -> Result<serde_json::Value, DeliveryError> {
        self.send(routed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub transport that records every payload it receives.
    struct RecordingTransport {
        posts: AtomicUsize,
        payloads: Mutex<Vec<NotifyPayload>>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                posts: AtomicUsize::new(0),
                payloads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NotifyTransport for RecordingTransport {
        fn name(&self) -> &str {
            "recording"
        }

        async fn post(
            &self,
            payload: &NotifyPayload,
        ) -> Result<serde_json::Value, DeliveryError> {
            self.posts.fetch_add(1, Ordering::SeqCst);
            self.payloads.lock().unwrap().push(payload.clone());
            Ok(serde_json::json!({"status": "Notification sent"}))
        }
    }

    fn routed(recipient: &str, message: &str) -> RoutedNotification {
        RoutedNotification {
            recipient: recipient.into(),
            message: message.into(),
            channel: "email".into(),
            is_draft: false,
        }
    }

    #[tokio::test]
    async fn sends_payload_and_passes_response_through() {
        let transport = Arc::new(RecordingTransport::new());
        let notifier = Notifier::new(transport.clone());

        let response = notifier
            .send(&routed("devops@company.com", "Deploy at noon"))
            .await
            .unwrap();

        assert_eq!(response["status"], "Notification sent");
        assert_eq!(transport.posts.load(Ordering::SeqCst), 1);
        let payloads = transport.payloads.lock().unwrap();
        assert_eq!(payloads[0].recipient, "devops@company.com");
        assert_eq!(payloads[0].message, "Deploy at noon");
    }

    #[tokio::test]
    async fn empty_recipient_fails_before_transport() {
        let transport = Arc::new(RecordingTransport::new());
        let notifier = Notifier::new(transport.clone());

        let result = notifier.send(&routed("", "hello")).await;
        assert!(matches!(
            result,
            Err(DeliveryError::EmptyField { field: "recipient" })
        ));
        assert_eq!(transport.posts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_message_fails_before_transport() {
        let transport = Arc::new(RecordingTransport::new());
        let notifier = Notifier::new(transport.clone());

        let result = notifier.send(&routed("devops@company.com", "   ")).await;
        assert!(matches!(
            result,
            Err(DeliveryError::EmptyField { field: "message" })
        ));
        assert_eq!(transport.posts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn payload_serializes_to_fixed_wire_shape() {
        let payload = NotifyPayload {
            recipient: "user@example.com".into(),
            message: "Urgent: Meeting at 10 AM tomorrow for DevOps".into(),
            channel: "email".into(),
            is_draft: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "recipient": "user@example.com",
                "message": "Urgent: Meeting at 10 AM tomorrow for DevOps",
                "channel": "email",
                "is_draft": true,
            })
        );
    }
}
