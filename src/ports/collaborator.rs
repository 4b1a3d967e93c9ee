//! Shared error type for language-model collaborator ports.

use thiserror::Error;

use crate::domain::diary::DiaryError;

/// Errors from the structuring and analysis collaborators.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    /// Collaborator is unavailable (network failure, service down).
    #[error("collaborator unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The call exceeded its bounded timeout.
    #[error("collaborator timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Rate limited by the collaborator.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Failed to parse the collaborator's reply.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request was malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CollaboratorError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CollaboratorError::Unavailable { .. }
                | CollaboratorError::Timeout { .. }
                | CollaboratorError::RateLimited { .. }
        )
    }
}

impl From<CollaboratorError> for DiaryError {
    fn from(err: CollaboratorError) -> Self {
        DiaryError::collaborator_unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_failures_are_retryable() {
        assert!(CollaboratorError::unavailable("down").is_retryable());
        assert!(CollaboratorError::timeout(30).is_retryable());
        assert!(CollaboratorError::RateLimited { retry_after_secs: 10 }.is_retryable());
    }

    #[test]
    fn request_problems_are_not_retryable() {
        assert!(!CollaboratorError::parse("bad json").is_retryable());
        assert!(!CollaboratorError::InvalidRequest("empty".to_string()).is_retryable());
    }

    #[test]
    fn converts_to_diary_error() {
        let err: DiaryError = CollaboratorError::unavailable("service down").into();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("service down"));
    }

    #[test]
    fn displays_timeout_seconds() {
        assert_eq!(
            CollaboratorError::timeout(15).to_string(),
            "collaborator timed out after 15s"
        );
    }
}
