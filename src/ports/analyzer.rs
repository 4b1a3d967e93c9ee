//! Diary analyzer port.
//!
//! The analysis collaborator turns a completed diary (segments, general
//! content, conversation history) into keywords, per-segment summaries and
//! an emotion reading. Unlike structuring, analysis has no local fallback:
//! failures surface to the caller and the record stays un-analyzed for a
//! later retry.

use async_trait::async_trait;

use crate::domain::diary::{DiaryAnalysis, DiaryRecord, StructuredContent};

use super::collaborator::CollaboratorError;
use super::structurer::Utterance;

/// Port for the analysis collaborator.
#[async_trait]
pub trait DiaryAnalyzer: Send + Sync {
    /// Analyzes a completed diary.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Timeout` for transient failures; the completion
    ///   gate surfaces these and leaves the record retryable
    async fn analyze(&self, request: AnalyzeRequest) -> Result<DiaryAnalysis, CollaboratorError>;
}

/// Request for the analysis collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    /// The three segment texts.
    pub segments: StructuredContent,
    /// General content not attributed to a segment.
    pub raw_content: String,
    /// Full dialogue history, oldest first.
    pub history: Vec<Utterance>,
    /// The reflective question/answer pair, when both exist.
    pub reflection: Option<(String, String)>,
}

impl AnalyzeRequest {
    /// Creates a request with empty history and no reflection pair.
    pub fn new(segments: StructuredContent, raw_content: impl Into<String>) -> Self {
        Self {
            segments,
            raw_content: raw_content.into(),
            history: Vec::new(),
            reflection: None,
        }
    }

    /// Sets the dialogue history.
    pub fn with_history(mut self, history: Vec<Utterance>) -> Self {
        self.history = history;
        self
    }

    /// Sets the reflective question/answer pair.
    pub fn with_reflection(
        mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        self.reflection = Some((question.into(), answer.into()));
        self
    }

    /// Builds a request from a diary record's current state.
    pub fn from_record(record: &DiaryRecord) -> Self {
        let mut request = Self {
            segments: record.segments().content().clone(),
            raw_content: record.segments().raw_content().to_string(),
            history: Utterance::from_log(record.conversation_log()),
            reflection: None,
        };
        if let (Some(question), Some(answer)) =
            (record.reflective_question(), record.reflective_answer())
        {
            request.reflection = Some((question.to_string(), answer.to_string()));
        }
        request
    }
}
