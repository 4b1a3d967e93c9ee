//! UpdateDiary command handler.
//!
//! Edits a diary outside the conversational flow: retitle, redate, or
//! rewrite segment texts wholesale. Content edits invalidate any attached
//! analysis and recompute the phase, so emptying a segment re-opens a
//! completed diary.

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::diary::{DiaryPhase, Segment};
use crate::domain::foundation::{DiaryId, UserId};
use crate::ports::{DiaryRepository, RepositoryError};

/// Command to update a diary.
#[derive(Debug, Clone, Default)]
pub struct UpdateDiaryCommand {
    /// The diary's owner.
    pub user_id: UserId,
    /// The diary to update.
    pub diary_id: DiaryId,
    /// New title, if changing.
    pub title: Option<String>,
    /// New date, if changing.
    pub date: Option<NaiveDate>,
    /// Segment texts to rewrite wholesale (empty text empties the segment).
    pub segment_edits: Vec<(Segment, String)>,
}

impl UpdateDiaryCommand {
    /// Creates an empty update for a diary.
    pub fn new(user_id: UserId, diary_id: DiaryId) -> Self {
        Self {
            user_id,
            diary_id,
            title: None,
            date: None,
            segment_edits: Vec::new(),
        }
    }

    /// Sets a new title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Adds a segment rewrite.
    pub fn with_segment_edit(mut self, segment: Segment, text: impl Into<String>) -> Self {
        self.segment_edits.push((segment, text.into()));
        self
    }
}

/// Errors that can occur when updating a diary.
#[derive(Debug, Clone, Error)]
pub enum UpdateDiaryError {
    /// The diary does not exist or belongs to another user.
    #[error("Diary not found: {0}")]
    DiaryNotFound(DiaryId),

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for UpdateDiaryError {
    fn from(err: RepositoryError) -> Self {
        UpdateDiaryError::Repository(err.to_string())
    }
}

/// Result of updating a diary.
#[derive(Debug, Clone)]
pub struct UpdateDiaryResult {
    /// The diary that was updated.
    pub diary_id: DiaryId,
    /// Phase after the edits.
    pub phase: DiaryPhase,
    /// Segments still missing, in canonical order.
    pub missing_segments: Vec<Segment>,
    /// True if an attached analysis survived the edits.
    pub analyzed: bool,
}

/// Handler for UpdateDiary commands.
pub struct UpdateDiaryHandler<R>
where
    R: DiaryRepository,
{
    repository: Arc<R>,
}

impl<R> UpdateDiaryHandler<R>
where
    R: DiaryRepository + 'static,
{
    /// Creates a new handler with the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Handles an update command.
    pub async fn handle(
        &self,
        cmd: UpdateDiaryCommand,
    ) -> Result<UpdateDiaryResult, UpdateDiaryError> {
        let mut record = self
            .repository
            .find_by_id(cmd.user_id, cmd.diary_id)
            .await?
            .ok_or(UpdateDiaryError::DiaryNotFound(cmd.diary_id))?;

        if let Some(title) = cmd.title {
            record.set_title(Some(title));
        }
        if let Some(date) = cmd.date {
            record.set_date(date);
        }
        for (segment, text) in cmd.segment_edits {
            record.replace_segment(segment, &text);
        }

        self.repository.save(&record).await?;

        Ok(UpdateDiaryResult {
            diary_id: record.id(),
            phase: record.phase(),
            missing_segments: record.missing_segments(),
            analyzed: record.is_analyzed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDiaryRepository;
    use crate::domain::diary::{
        DiaryAnalysis, DiaryRecord, EmotionAnalysis, StructuredContent, SupplementTarget,
    };

    async fn completed_record(repository: &InMemoryDiaryRepository) -> DiaryRecord {
        let mut record = DiaryRecord::new(
            UserId::new(),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
        );
        for segment in Segment::ALL {
            record
                .apply_content(SupplementTarget::from(segment), "something happened")
                .unwrap();
        }
        record
            .apply_content(SupplementTarget::QuestionResponse, "I felt calm")
            .unwrap();
        record.attach_analysis(DiaryAnalysis::new(
            vec!["calm".to_string()],
            StructuredContent::default(),
            EmotionAnalysis::neutral("test"),
        ));
        repository.save(&record).await.unwrap();
        record
    }

    #[tokio::test]
    async fn metadata_edits_keep_analysis_valid() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let record = completed_record(&repository).await;
        let handler = UpdateDiaryHandler::new(repository.clone());

        let result = handler
            .handle(
                UpdateDiaryCommand::new(record.user_id(), record.id())
                    .with_title("Renamed")
                    .with_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
            )
            .await
            .unwrap();

        assert_eq!(result.phase, DiaryPhase::Complete);
        assert!(result.analyzed);

        let stored = repository
            .find_by_id(record.user_id(), record.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title(), Some("Renamed"));
        assert!(stored.is_analyzed());
    }

    #[tokio::test]
    async fn rewriting_a_segment_invalidates_analysis() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let record = completed_record(&repository).await;
        let handler = UpdateDiaryHandler::new(repository.clone());

        let result = handler
            .handle(
                UpdateDiaryCommand::new(record.user_id(), record.id())
                    .with_segment_edit(Segment::Morning, "a rewritten morning"),
            )
            .await
            .unwrap();

        // Still complete (nothing emptied), but analysis is stale
        assert_eq!(result.phase, DiaryPhase::Complete);
        assert!(!result.analyzed);
    }

    #[tokio::test]
    async fn emptying_a_segment_reopens_the_diary() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let record = completed_record(&repository).await;
        let handler = UpdateDiaryHandler::new(repository.clone());

        let result = handler
            .handle(
                UpdateDiaryCommand::new(record.user_id(), record.id())
                    .with_segment_edit(Segment::Evening, ""),
            )
            .await
            .unwrap();

        assert_eq!(result.phase, DiaryPhase::CollectingInfo);
        assert_eq!(result.missing_segments, vec![Segment::Evening]);
        assert!(!result.analyzed);
    }

    #[tokio::test]
    async fn unknown_diary_is_reported() {
        let repository = Arc::new(InMemoryDiaryRepository::new());
        let handler = UpdateDiaryHandler::new(repository);

        let result = handler
            .handle(UpdateDiaryCommand::new(UserId::new(), DiaryId::new()))
            .await;

        assert!(matches!(result, Err(UpdateDiaryError::DiaryNotFound(_))));
    }
}
