//! SupplementDiary command handler.
//!
//! Feeds one piece of supplemental content (typed text or a voice
//! recording) into a diary's completion flow: transcribe if needed, ingest
//! through the transition engine, persist, and report what to ask next.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::diary::{
    DiaryError, DiaryPhase, Segment, SupplementTarget, TransitionEngine,
};
use crate::domain::foundation::{DiaryId, UserId};
use crate::ports::{
    AudioSource, DiaryRepository, DiaryStructurer, RepositoryError, Transcriber,
    TranscriptionError,
};

/// The content of a supplement: already-typed text or a recording.
#[derive(Debug, Clone)]
pub enum SupplementSource {
    /// Typed (or already transcribed) text.
    Text(String),
    /// A voice recording, transcribed before ingesting.
    Voice(AudioSource),
}

impl SupplementSource {
    /// Creates a text source.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a voice source.
    pub fn voice(audio: AudioSource) -> Self {
        Self::Voice(audio)
    }
}

/// Command to supplement a diary.
#[derive(Debug, Clone)]
pub struct SupplementDiaryCommand {
    /// The diary's owner.
    pub user_id: UserId,
    /// The diary to supplement.
    pub diary_id: DiaryId,
    /// Where the content belongs.
    pub target: SupplementTarget,
    /// The content itself.
    pub source: SupplementSource,
}

impl SupplementDiaryCommand {
    /// Creates a text supplement command.
    pub fn text(
        user_id: UserId,
        diary_id: DiaryId,
        target: SupplementTarget,
        text: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            diary_id,
            target,
            source: SupplementSource::text(text),
        }
    }

    /// Creates a voice supplement command.
    pub fn voice(
        user_id: UserId,
        diary_id: DiaryId,
        target: SupplementTarget,
        audio: AudioSource,
    ) -> Self {
        Self {
            user_id,
            diary_id,
            target,
            source: SupplementSource::voice(audio),
        }
    }
}

/// Errors that can occur when supplementing a diary.
#[derive(Debug, Clone, Error)]
pub enum SupplementDiaryError {
    /// The diary does not exist or belongs to another user.
    #[error("Diary not found: {0}")]
    DiaryNotFound(DiaryId),

    /// Supplement content is empty or whitespace only.
    #[error("Validation error: supplement content cannot be empty")]
    EmptyContent,

    /// The operation is invalid for the diary's current phase.
    #[error("Phase error: {0}")]
    PhaseViolation(String),

    /// The recording could not be transcribed.
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// A collaborator failed in a retryable way.
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<DiaryError> for SupplementDiaryError {
    fn from(err: DiaryError) -> Self {
        match err {
            DiaryError::EmptyContent => SupplementDiaryError::EmptyContent,
            DiaryError::PhaseViolation { .. } => {
                SupplementDiaryError::PhaseViolation(err.to_string())
            }
            DiaryError::Transcription { reason } => SupplementDiaryError::Transcription(reason),
            DiaryError::CollaboratorUnavailable { message } => {
                SupplementDiaryError::Collaborator(message)
            }
        }
    }
}

impl From<TranscriptionError> for SupplementDiaryError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::Unavailable { message } => {
                SupplementDiaryError::Collaborator(message)
            }
            other => SupplementDiaryError::Transcription(other.to_string()),
        }
    }
}

impl From<RepositoryError> for SupplementDiaryError {
    fn from(err: RepositoryError) -> Self {
        SupplementDiaryError::Repository(err.to_string())
    }
}

/// Result of supplementing a diary.
#[derive(Debug, Clone)]
pub struct SupplementDiaryResult {
    /// The diary that was supplemented.
    pub diary_id: DiaryId,
    /// Phase after the transition.
    pub phase: DiaryPhase,
    /// Segments still missing, in canonical order.
    pub missing_segments: Vec<Segment>,
    /// The question to surface to the user, if any.
    pub next_question: Option<String>,
    /// True if the diary reached completion.
    pub complete: bool,
}

/// Handler for SupplementDiary commands.
pub struct SupplementDiaryHandler<R, S, T>
where
    R: DiaryRepository,
    S: DiaryStructurer,
    T: Transcriber,
{
    repository: Arc<R>,
    structurer: Arc<S>,
    transcriber: Arc<T>,
    engine: TransitionEngine,
}

impl<R, S, T> SupplementDiaryHandler<R, S, T>
where
    R: DiaryRepository + 'static,
    S: DiaryStructurer + 'static,
    T: Transcriber + 'static,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(
        repository: Arc<R>,
        structurer: Arc<S>,
        transcriber: Arc<T>,
        engine: TransitionEngine,
    ) -> Self {
        Self {
            repository,
            structurer,
            transcriber,
            engine,
        }
    }

    /// Handles a supplement command.
    pub async fn handle(
        &self,
        cmd: SupplementDiaryCommand,
    ) -> Result<SupplementDiaryResult, SupplementDiaryError> {
        let mut record = self
            .repository
            .find_by_id(cmd.user_id, cmd.diary_id)
            .await?
            .ok_or(SupplementDiaryError::DiaryNotFound(cmd.diary_id))?;

        let text = match cmd.source {
            SupplementSource::Text(text) => text,
            SupplementSource::Voice(audio) => {
                self.transcriber.transcribe(audio).await?.into_text()
            }
        };

        let outcome = self
            .engine
            .ingest(&mut record, cmd.target, &text, self.structurer.as_ref())
            .await?;

        self.repository.save(&record).await?;

        Ok(SupplementDiaryResult {
            diary_id: record.id(),
            phase: outcome.phase,
            missing_segments: record.missing_segments(),
            complete: outcome.is_complete(),
            next_question: outcome.next_question,
        })
    }
}
