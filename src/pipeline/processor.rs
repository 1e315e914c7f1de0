//! Notification pipeline — extract, resolve, render, deliver.
//!
//! Flow for every conversation turn:
//! 1. `Extractor::parse()` — phrase matching, intent gate
//! 2. recipient resolution — requester while drafting, team otherwise
//! 3. `Renderer::render()` — template substitution
//! 4. action dispatch → one POST to the notify endpoint
//!
//! The pipeline holds no state between turns. Draft → approved progress
//! lives in the caller's `ReviewState`; an approval re-enters the same
//! path with the draft flag cleared.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::config::NotifyConfig;
use crate::delivery::{Notifier, NotifyTransport};
use crate::dispatch::{ActionRegistry, SEND_NOTIFICATION};
use crate::error::{DispatchError, PipelineError};
use crate::pipeline::extractor::Extractor;
use crate::pipeline::types::{
    NotificationRequest, ReviewState, RoutedNotification, TurnOutcome,
};
use crate::template::Renderer;

/// Conversation-to-notification pipeline.
pub struct NotifyPipeline {
    config: NotifyConfig,
    extractor: Extractor,
    renderer: Renderer,
    registry: ActionRegistry,
}

impl NotifyPipeline {
    /// Create a pipeline over the given transport.
    pub fn new(config: NotifyConfig, transport: Arc<dyn NotifyTransport>) -> Self {
        let extractor = Extractor::from_config(&config);
        let mut registry = ActionRegistry::new();
        registry.register(Arc::new(Notifier::new(transport)));
        Self {
            config,
            extractor,
            renderer: Renderer::new(),
            registry,
        }
    }

    /// Process one conversation snapshot end to end.
    pub async fn process(&self, conversation: &str) -> Result<TurnOutcome, PipelineError> {
        let parsed = self
            .extractor
            .parse(conversation)
            .ok_or(DispatchError::NoIntent)?;
        self.dispatch(&parsed.action, parsed.request).await
    }

    /// Re-send a previously drafted request after external approval.
    ///
    /// Same path as `process`, with the draft flag cleared so the
    /// recipient re-resolves to the team identity.
    pub async fn process_approval(
        &self,
        request: NotificationRequest,
    ) -> Result<TurnOutcome, PipelineError> {
        let request = NotificationRequest {
            draft_requested: false,
            ..request
        };
        self.dispatch(SEND_NOTIFICATION, request).await
    }

    /// Detect an approval phrase in a follow-up turn.
    pub fn detects_approval(&self, conversation: &str) -> bool {
        self.extractor.detects_approval(conversation)
    }

    async fn dispatch(
        &self,
        action_name: &str,
        request: NotificationRequest,
    ) -> Result<TurnOutcome, PipelineError> {
        let action = self
            .registry
            .get(action_name)
            .ok_or_else(|| DispatchError::UnknownAction {
                name: action_name.to_string(),
            })?;

        let routed = self.route(&request)?;
        info!(
            action = action_name,
            team = %request.team,
            recipient = %routed.recipient,
            channel = %routed.channel,
            is_draft = routed.is_draft,
            "Processing notification turn"
        );

        let response = action.run(&routed).await?;

        let state = if routed.is_draft {
            ReviewState::Draft
        } else {
            ReviewState::Sent
        };

        Ok(TurnOutcome {
            request,
            routed,
            response,
            state,
            processed_at: Utc::now(),
        })
    }

    /// Resolve the recipient and render the message template.
    fn route(&self, request: &NotificationRequest) -> Result<RoutedNotification, PipelineError> {
        let recipient = if request.draft_requested {
            self.config.user_identity.clone()
        } else {
            self.config.team_identity(&request.team)
        };

        let params = HashMap::from([
            ("event".to_string(), request.event.clone()),
            ("time".to_string(), request.time.clone()),
            ("team".to_string(), request.team.clone()),
        ]);
        let message = self.renderer.render(&self.config.template, &params)?;

        Ok(RoutedNotification {
            recipient,
            message,
            channel: request.channel.clone(),
            is_draft: request.draft_requested,
        })
    }
}
