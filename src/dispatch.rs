//! Action registry — maps parsed action names to handlers.
//!
//! The parse entry point names an action; dispatching an unknown name
//! fails before anything is sent. Registration happens once at pipeline
//! construction, so the registry is plain map lookup afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::pipeline::types::RoutedNotification;

/// Registry key for the notification send action.
pub const SEND_NOTIFICATION: &str = "send_notification";

/// A named action that delivers a routed notification.
#[async_trait]
pub trait NotificationAction: Send + Sync {
    /// Action name used as the registry key.
    fn name(&self) -> &str;

    /// Execute the action, returning the endpoint's decoded response.
    async fn run(&self, routed: &RoutedNotification) -> Result<serde_json::Value, DeliveryError>;
}

/// Registry of available actions.
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn NotificationAction>>,
}

impl ActionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action under its own name.
    pub fn register(&mut self, action: Arc<dyn NotificationAction>) {
        let name = action.name().to_string();
        tracing::debug!("Registered action: {}", name);
        self.actions.insert(name, action);
    }

    /// Get an action by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn NotificationAction>> {
        self.actions.get(name).cloned()
    }

    /// Check if an action exists.
    pub fn has(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// List all action names.
    pub fn list(&self) -> Vec<String> {
        self.actions.keys().cloned().collect()
    }

    /// Get the number of registered actions.
    pub fn count(&self) -> usize {
        self.actions.len()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
