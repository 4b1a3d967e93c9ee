//! StartDiary command handler.
//!
//! Creates an empty diary record for a user and date, optionally feeding a
//! first utterance straight into the completion flow so the caller gets an
//! opening question back.

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::diary::{
    DiaryPhase, DiaryRecord, Segment, SupplementTarget, TransitionEngine,
};
use crate::domain::foundation::{DiaryId, UserId};
use crate::ports::{
    DiaryRepository, DiaryStructurer, RepositoryError, Transcriber, TranscriptionError,
};

use super::supplement_diary::SupplementSource;

/// Command to start a new diary.
#[derive(Debug, Clone)]
pub struct StartDiaryCommand {
    /// The diary's owner.
    pub user_id: UserId,
    /// The date this diary is about.
    pub date: NaiveDate,
    /// Optional title.
    pub title: Option<String>,
    /// Optional first utterance, applied as general content.
    pub opening: Option<SupplementSource>,
}

impl StartDiaryCommand {
    /// Creates a command for an empty diary.
    pub fn new(user_id: UserId, date: NaiveDate) -> Self {
        Self {
            user_id,
            date,
            title: None,
            opening: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the opening utterance.
    pub fn with_opening(mut self, opening: SupplementSource) -> Self {
        self.opening = Some(opening);
        self
    }
}

/// Errors that can occur when starting a diary.
#[derive(Debug, Clone, Error)]
pub enum StartDiaryError {
    /// Opening content is empty or whitespace only.
    #[error("Validation error: opening content cannot be empty")]
    EmptyContent,

    /// The opening recording could not be transcribed.
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// A collaborator failed in a retryable way.
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<TranscriptionError> for StartDiaryError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::Unavailable { message } => StartDiaryError::Collaborator(message),
            other => StartDiaryError::Transcription(other.to_string()),
        }
    }
}

impl From<RepositoryError> for StartDiaryError {
    fn from(err: RepositoryError) -> Self {
        StartDiaryError::Repository(err.to_string())
    }
}

/// Result of starting a diary.
#[derive(Debug, Clone)]
pub struct StartDiaryResult {
    /// The new diary's id.
    pub diary_id: DiaryId,
    /// Phase after creation (and the opening ingest, if any).
    pub phase: DiaryPhase,
    /// Segments still missing, in canonical order.
    pub missing_segments: Vec<Segment>,
    /// The question to surface to the user, if any.
    pub next_question: Option<String>,
}

/// Handler for StartDiary commands.
pub struct StartDiaryHandler<R, S, T>
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

impl<R, S, T> StartDiaryHandler<R, S, T>
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

    /// Handles a start command.
    pub async fn handle(
        &self,
        cmd: StartDiaryCommand,
    ) -> Result<StartDiaryResult, StartDiaryError> {
        let mut record = DiaryRecord::new(cmd.user_id, cmd.date);
        if let Some(title) = cmd.title {
            record = record.with_title(title);
        }

        if let Some(opening) = cmd.opening {
            let text = match opening {
                SupplementSource::Text(text) => text,
                SupplementSource::Voice(audio) => {
                    self.transcriber.transcribe(audio).await?.into_text()
                }
            };
            self.engine
                .ingest(
                    &mut record,
                    SupplementTarget::General,
                    &text,
                    self.structurer.as_ref(),
                )
                .await
                .map_err(|err| match err {
                    crate::domain::diary::DiaryError::EmptyContent => {
                        StartDiaryError::EmptyContent
                    }
                    other => StartDiaryError::Domain(other.to_string()),
                })?;
        }

        self.repository.save(&record).await?;

        Ok(StartDiaryResult {
            diary_id: record.id(),
            phase: record.phase(),
            missing_segments: record.missing_segments(),
            next_question: record.pending_question().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryDiaryRepository, MockStructurer, MockTranscriber};
    use crate::ports::{AudioSource, StructureReply};

    fn handler(
        repository: Arc<InMemoryDiaryRepository>,
        structurer: MockStructurer,
        transcriber: MockTranscriber,
    ) -> StartDiaryHandler<InMemoryDiaryRepository, MockStructurer, MockTranscriber> {
        StartDiaryHandler::new(
            repository,
            Arc::new(structurer),
            Arc::new(transcriber),
            TransitionEngine::new(),
        )
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[tokio::test]
    async fn starts_an_empty_diary() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let handler = handler(
            repository.clone(),
            MockStructurer::new(),
            MockTranscriber::new(),
        );
        let user_id = UserId::new();

        let result = handler
            .handle(StartDiaryCommand::new(user_id, test_date()).with_title("Thursday"))
            .await
            .unwrap();

        assert_eq!(result.phase, DiaryPhase::CollectingInfo);
        assert_eq!(result.missing_segments, Segment::ALL.to_vec());
        assert!(result.next_question.is_none());

        let stored = repository
            .find_by_id(user_id, result.diary_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title(), Some("Thursday"));
        assert!(stored.conversation_log().is_empty());
    }

    #[tokio::test]
    async fn voice_opening_seeds_the_conversation() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let handler = handler(
            repository.clone(),
            MockStructurer::new()
                .with_reply(StructureReply::new().with_next_question("How did the day start?")),
            MockTranscriber::new().with_transcript("it was a busy day overall"),
        );
        let user_id = UserId::new();

        let result = handler
            .handle(
                StartDiaryCommand::new(user_id, test_date())
                    .with_opening(SupplementSource::voice(AudioSource::bytes(vec![1u8; 8]))),
            )
            .await
            .unwrap();

        assert_eq!(result.phase, DiaryPhase::CollectingInfo);
        assert_eq!(
            result.next_question.as_deref(),
            Some("How did the day start?")
        );

        let stored = repository
            .find_by_id(user_id, result.diary_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.segments().raw_content(), "it was a busy day overall");
        assert_eq!(stored.conversation_log().len(), 2);
    }

    #[tokio::test]
    async fn empty_opening_text_is_rejected() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let handler = handler(
            repository.clone(),
            MockStructurer::new(),
            MockTranscriber::new(),
        );

        let result = handler
            .handle(
                StartDiaryCommand::new(UserId::new(), test_date())
                    .with_opening(SupplementSource::text("  ")),
            )
            .await;

        assert!(matches!(result, Err(StartDiaryError::EmptyContent)));
        assert_eq!(repository.record_count().await, 0);
    }
}
