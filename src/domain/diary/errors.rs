//! Error taxonomy for diary operations.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

use super::phase::DiaryPhase;

/// Errors raised by diary record operations and the completion flow.
///
/// None of these are fatal to the process; each is scoped to a single
/// record operation and leaves the record unchanged.
#[derive(Debug, Clone, Error)]
pub enum DiaryError {
    /// Caller supplied empty or whitespace-only content.
    #[error("content cannot be empty")]
    EmptyContent,

    /// Caller invoked an operation invalid for the record's current phase.
    #[error("{operation} is not valid in phase {phase:?}: {reason}")]
    PhaseViolation {
        /// The attempted operation.
        operation: &'static str,
        /// The record's phase at the time.
        phase: DiaryPhase,
        /// Why the operation was rejected.
        reason: String,
    },

    /// Audio could not be transcribed (empty or unintelligible input).
    #[error("transcription failed: {reason}")]
    Transcription {
        /// What went wrong.
        reason: String,
    },

    /// A collaborator call failed transiently; the operation may be retried.
    #[error("collaborator unavailable: {message}")]
    CollaboratorUnavailable {
        /// Error details.
        message: String,
    },
}

impl DiaryError {
    /// Creates a phase violation error.
    pub fn phase_violation(
        operation: &'static str,
        phase: DiaryPhase,
        reason: impl Into<String>,
    ) -> Self {
        DiaryError::PhaseViolation {
            operation,
            phase,
            reason: reason.into(),
        }
    }

    /// Creates a transcription error.
    pub fn transcription(reason: impl Into<String>) -> Self {
        DiaryError::Transcription {
            reason: reason.into(),
        }
    }

    /// Creates a collaborator unavailable error.
    pub fn collaborator_unavailable(message: impl Into<String>) -> Self {
        DiaryError::CollaboratorUnavailable {
            message: message.into(),
        }
    }

    /// Returns true if the failed operation can safely be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DiaryError::CollaboratorUnavailable { .. })
    }

    /// Returns the domain error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DiaryError::EmptyContent => ErrorCode::EmptyContent,
            DiaryError::PhaseViolation { .. } => ErrorCode::PhaseViolation,
            DiaryError::Transcription { .. } => ErrorCode::TranscriptionFailed,
            DiaryError::CollaboratorUnavailable { .. } => ErrorCode::CollaboratorUnavailable,
        }
    }
}
