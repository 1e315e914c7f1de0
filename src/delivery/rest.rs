//! REST transport — posts payloads to the configured notify endpoint.

use async_trait::async_trait;

use crate::delivery::{NotifyPayload, NotifyTransport};
use crate::error::DeliveryError;

/// HTTP transport backed by reqwest.
pub struct RestTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl RestTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotifyTransport for RestTransport {
    fn name(&self) -> &str {
        "rest"
    }

    async fn post(&self, payload: &NotifyPayload) -> Result<serde_json::Value, DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport {
                url: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DeliveryError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_configured_endpoint() {
        let transport = RestTransport::new("https://api.rester.example/notify");
        assert_eq!(transport.endpoint(), "https://api.rester.example/notify");
        assert_eq!(transport.name(), "rest");
    }
}
