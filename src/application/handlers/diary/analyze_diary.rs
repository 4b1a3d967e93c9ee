//! AnalyzeDiary command handler.
//!
//! Runs the completion gate: analyzes a completed diary at most once,
//! returning the stored analysis on repeat calls. Collaborator failures
//! leave the diary un-analyzed so the caller can retry later.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::diary::{AnalyzeOutcome, CompletionGate, DiaryAnalysis, DiaryError, Segment};
use crate::domain::foundation::{DiaryId, UserId};
use crate::ports::{DiaryAnalyzer, DiaryRepository, RepositoryError};

/// Command to analyze a diary.
#[derive(Debug, Clone)]
pub struct AnalyzeDiaryCommand {
    /// The diary's owner.
    pub user_id: UserId,
    /// The diary to analyze.
    pub diary_id: DiaryId,
}

impl AnalyzeDiaryCommand {
    /// Creates a new analyze command.
    pub fn new(user_id: UserId, diary_id: DiaryId) -> Self {
        Self { user_id, diary_id }
    }
}

/// Errors that can occur when analyzing a diary.
#[derive(Debug, Clone, Error)]
pub enum AnalyzeDiaryError {
    /// The diary does not exist or belongs to another user.
    #[error("Diary not found: {0}")]
    DiaryNotFound(DiaryId),

    /// The diary has not reached completion yet.
    #[error("Diary is not complete; missing segments: {missing_segments:?}")]
    NotComplete {
        /// Segments still missing, in canonical order.
        missing_segments: Vec<Segment>,
    },

    /// The analysis collaborator failed; safe to retry.
    #[error("Analysis unavailable, retry later: {0}")]
    AnalysisUnavailable(String),

    /// Repository error during persistence.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for AnalyzeDiaryError {
    fn from(err: RepositoryError) -> Self {
        AnalyzeDiaryError::Repository(err.to_string())
    }
}

/// Result of analyzing a diary.
#[derive(Debug, Clone)]
pub struct AnalyzeDiaryResult {
    /// The diary that was analyzed.
    pub diary_id: DiaryId,
    /// The analysis attached to the diary.
    pub analysis: DiaryAnalysis,
    /// True if the collaborator ran for this call; false when the stored
    /// analysis was returned.
    pub freshly_analyzed: bool,
}

/// Handler for AnalyzeDiary commands.
pub struct AnalyzeDiaryHandler<R, A>
where
    R: DiaryRepository,
    A: DiaryAnalyzer,
{
    repository: Arc<R>,
    analyzer: Arc<A>,
    gate: CompletionGate,
}

impl<R, A> AnalyzeDiaryHandler<R, A>
where
    R: DiaryRepository + 'static,
    A: DiaryAnalyzer + 'static,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(repository: Arc<R>, analyzer: Arc<A>) -> Self {
        Self {
            repository,
            analyzer,
            gate: CompletionGate::new(),
        }
    }

    /// Handles an analyze command.
    pub async fn handle(
        &self,
        cmd: AnalyzeDiaryCommand,
    ) -> Result<AnalyzeDiaryResult, AnalyzeDiaryError> {
        let mut record = self
            .repository
            .find_by_id(cmd.user_id, cmd.diary_id)
            .await?
            .ok_or(AnalyzeDiaryError::DiaryNotFound(cmd.diary_id))?;

        let outcome = self
            .gate
            .maybe_analyze(&mut record, self.analyzer.as_ref())
            .await
            .map_err(|err| match err {
                DiaryError::CollaboratorUnavailable { message } => {
                    AnalyzeDiaryError::AnalysisUnavailable(message)
                }
                other => AnalyzeDiaryError::AnalysisUnavailable(other.to_string()),
            })?;

        match outcome {
            AnalyzeOutcome::NotReady { missing_segments } => {
                Err(AnalyzeDiaryError::NotComplete { missing_segments })
            }
            AnalyzeOutcome::AlreadyAnalyzed(analysis) => Ok(AnalyzeDiaryResult {
                diary_id: record.id(),
                analysis,
                freshly_analyzed: false,
            }),
            AnalyzeOutcome::Analyzed(analysis) => {
                self.repository.save(&record).await?;
                Ok(AnalyzeDiaryResult {
                    diary_id: record.id(),
                    analysis,
                    freshly_analyzed: true,
                })
            }
        }
    }
}
