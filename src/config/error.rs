//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Collaborator timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Retry budget exceeds maximum allowed (10)")]
    TooManyRetries,

    #[error("Prompt override '{0}' cannot be blank")]
    BlankPrompt(&'static str),
}
