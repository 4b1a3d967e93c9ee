//! GetDiaryStatus query handler.
//!
//! Pure read used for polling: completion phase, missing segments, the
//! pending question, and the conversation so far. Never mutates the record.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::diary::{AnalysisStatus, CompletionGate};
use crate::domain::foundation::{DiaryId, UserId};
use crate::ports::{DiaryRepository, RepositoryError, Utterance};

/// Command to fetch a diary's status.
#[derive(Debug, Clone)]
pub struct GetDiaryStatusCommand {
    /// The diary's owner.
    pub user_id: UserId,
    /// The diary to inspect.
    pub diary_id: DiaryId,
}

impl GetDiaryStatusCommand {
    /// Creates a new status command.
    pub fn new(user_id: UserId, diary_id: DiaryId) -> Self {
        Self { user_id, diary_id }
    }
}

/// Errors that can occur when fetching diary status.
#[derive(Debug, Clone, Error)]
pub enum GetDiaryStatusError {
    /// The diary does not exist or belongs to another user.
    #[error("Diary not found: {0}")]
    DiaryNotFound(DiaryId),

    /// Repository error during the read.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for GetDiaryStatusError {
    fn from(err: RepositoryError) -> Self {
        GetDiaryStatusError::Repository(err.to_string())
    }
}

/// Result of a status query.
#[derive(Debug, Clone)]
pub struct GetDiaryStatusResult {
    /// The inspected diary.
    pub diary_id: DiaryId,
    /// Completion and analysis status.
    pub status: AnalysisStatus,
    /// The conversation so far, oldest first.
    pub conversation: Vec<Utterance>,
}

/// Handler for GetDiaryStatus queries.
pub struct GetDiaryStatusHandler<R>
where
    R: DiaryRepository,
{
    repository: Arc<R>,
    gate: CompletionGate,
}

impl<R> GetDiaryStatusHandler<R>
where
    R: DiaryRepository + 'static,
{
    /// Creates a new handler with the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            gate: CompletionGate::new(),
        }
    }

    /// Handles a status query.
    pub async fn handle(
        &self,
        cmd: GetDiaryStatusCommand,
    ) -> Result<GetDiaryStatusResult, GetDiaryStatusError> {
        let record = self
            .repository
            .find_by_id(cmd.user_id, cmd.diary_id)
            .await?
            .ok_or(GetDiaryStatusError::DiaryNotFound(cmd.diary_id))?;

        Ok(GetDiaryStatusResult {
            diary_id: record.id(),
            status: self.gate.analysis_status(&record),
            conversation: Utterance::from_log(record.conversation_log()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDiaryRepository;
    use crate::domain::diary::{
        ConversationEntry, DiaryPhase, DiaryRecord, Segment, SupplementTarget,
    };
    use chrono::NaiveDate;

    #[tokio::test]
    async fn reports_missing_segments_and_conversation() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let mut record = DiaryRecord::new(
            UserId::new(),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
        );
        record
            .apply_content(SupplementTarget::Afternoon, "a walk in the park")
            .unwrap();
        record.append_conversation(ConversationEntry::user("a walk in the park").unwrap());
        record.append_conversation(
            ConversationEntry::assistant("What did you do in the morning?").unwrap(),
        );
        record.set_pending_question("What did you do in the morning?");
        repository.save(&record).await.unwrap();

        let handler = GetDiaryStatusHandler::new(repository);
        let result = handler
            .handle(GetDiaryStatusCommand::new(record.user_id(), record.id()))
            .await
            .unwrap();

        assert!(!result.status.complete);
        assert_eq!(result.status.phase, DiaryPhase::CollectingInfo);
        assert_eq!(
            result.status.missing_segments,
            vec![Segment::Morning, Segment::Evening]
        );
        assert_eq!(
            result.status.pending_question.as_deref(),
            Some("What did you do in the morning?")
        );
        assert_eq!(result.conversation.len(), 2);
    }

    #[tokio::test]
    async fn reading_status_does_not_mutate_the_record() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let record = DiaryRecord::new(
            UserId::new(),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
        );
        repository.save(&record).await.unwrap();

        let handler = GetDiaryStatusHandler::new(repository.clone());
        handler
            .handle(GetDiaryStatusCommand::new(record.user_id(), record.id()))
            .await
            .unwrap();

        let stored = repository
            .find_by_id(record.user_id(), record.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn unknown_diary_is_reported() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let handler = GetDiaryStatusHandler::new(repository);

        let result = handler
            .handle(GetDiaryStatusCommand::new(UserId::new(), DiaryId::new()))
            .await;

        assert!(matches!(
            result,
            Err(GetDiaryStatusError::DiaryNotFound(_))
        ));
    }
}
