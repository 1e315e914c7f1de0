//! Error types for Notify Assist.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Template error: {0}")]
    Render(#[from] RenderError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Template rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template placeholder '{name}' has no matching parameter")]
    MissingPlaceholder { name: String },
}

/// Notification delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Raised locally, before any network call is attempted.
    #[error("Validation failed: {field} is empty")]
    EmptyField { field: &'static str },

    #[error("POST to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Endpoint response was not valid JSON: {0}")]
    InvalidResponse(String),
}

/// Action dispatch errors.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown action: {name}")]
    UnknownAction { name: String },

    #[error("Conversation produced no notification intent")]
    NoIntent,
}

/// Pipeline-related errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
