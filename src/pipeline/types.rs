//! Shared types for the notification pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Extracted request ───────────────────────────────────────────────

/// Structured notification parameters extracted from one conversation
/// snapshot.
///
/// Created fresh per turn and discarded after the response is returned —
/// nothing is persisted. Recipient and message are resolved later by the
/// pipeline (see `RoutedNotification`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Short text description of the subject (e.g. "Meeting").
    pub event: String,
    /// Free-text temporal expression, no normalization (e.g. "10 AM tomorrow").
    pub time: String,
    /// Destination group identifier (e.g. "DevOps").
    pub team: String,
    /// True if the conversation contains a draft-indicating phrase.
    pub draft_requested: bool,
    /// Delivery medium: "email", "sms", "slack".
    pub channel: String,
    /// When the snapshot entered the pipeline.
    pub received_at: DateTime<Utc>,
}

// ── Routed notification ─────────────────────────────────────────────

/// A request with the recipient resolved and the message rendered —
/// everything the notifier needs for one send.
///
/// Recipient resolution: the requester's identity while drafting,
/// otherwise the team's channel identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedNotification {
    pub recipient: String,
    pub message: String,
    pub channel: String,
    pub is_draft: bool,
}

// ── Review state ────────────────────────────────────────────────────

/// Draft/approval state for a notification.
///
/// Owned and passed by the caller — the pipeline keeps no state between
/// turns. The only transition is `Draft` → `Sent`, triggered externally
/// by an approval detected in a later conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    /// Routed to the requester for review.
    Draft,
    /// Delivered to its final destination.
    Sent,
}

impl ReviewState {
    /// Apply an external approval.
    pub fn approve(self) -> Self {
        Self::Sent
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

// ── Parsed action ───────────────────────────────────────────────────

/// Named action produced by the parse entry point, resolved against the
/// action registry before anything is sent.
#[derive(Debug, Clone)]
pub struct ParsedAction {
    /// Registry key, e.g. "send_notification".
    pub action: String,
    pub request: NotificationRequest,
}

// ── Turn outcome ────────────────────────────────────────────────────

/// Result of processing one conversation turn end to end.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The extracted request that drove this turn.
    pub request: NotificationRequest,
    /// What was actually handed to the notifier.
    pub routed: RoutedNotification,
    /// Decoded endpoint response, passed through verbatim.
    pub response: serde_json::Value,
    /// Where the notification landed in the draft/approval cycle.
    pub state: ReviewState,
    /// When processing completed.
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_moves_draft_to_sent() {
        assert_eq!(ReviewState::Draft.approve(), ReviewState::Sent);
    }

    #[test]
    fn approve_is_idempotent_on_sent() {
        assert_eq!(ReviewState::Sent.approve(), ReviewState::Sent);
    }

    #[test]
    fn review_state_labels() {
        assert_eq!(ReviewState::Draft.label(), "draft");
        assert_eq!(ReviewState::Sent.label(), "sent");
        assert!(ReviewState::Draft.is_draft());
        assert!(!ReviewState::Sent.is_draft());
    }

    #[test]
    fn review_state_serialization() {
        assert_eq!(
            serde_json::to_value(ReviewState::Draft).unwrap(),
            serde_json::json!("draft")
        );
        assert_eq!(
            serde_json::to_value(ReviewState::Sent).unwrap(),
            serde_json::json!("sent")
        );
    }

    #[test]
    fn notification_request_roundtrips_through_json() {
        let request = NotificationRequest {
            event: "Meeting".into(),
            time: "10 AM tomorrow".into(),
            team: "DevOps".into(),
            draft_requested: true,
            channel: "email".into(),
            received_at: Utc::now(),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: NotificationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.team, "DevOps");
        assert!(back.draft_requested);
    }
}
