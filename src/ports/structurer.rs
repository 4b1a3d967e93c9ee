//! Diary structurer port.
//!
//! The structuring collaborator reads the diary content so far plus the
//! conversation history and phrases what to say next: a question about a
//! missing time-of-day segment, or the reflective question once everything
//! is filled. The transition engine treats the reply's structural fields as
//! advisory and keeps its own recomputation authoritative.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::diary::{
    ConversationLog, DiaryPhase, DiaryRecord, Segment, Speaker, StructuredContent,
};

use super::collaborator::CollaboratorError;

/// Port for the structure-and-ask collaborator.
#[async_trait]
pub trait DiaryStructurer: Send + Sync {
    /// Structures the diary content and phrases the next question.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Timeout` for transient failures (retryable; the
    ///   engine degrades to fixed local question text)
    async fn structure_and_ask(
        &self,
        request: StructureRequest,
    ) -> Result<StructureReply, CollaboratorError>;
}

/// A single turn of dialogue handed to a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Who spoke.
    pub speaker: Speaker,
    /// What was said.
    pub text: String,
}

impl Utterance {
    /// Creates a new utterance.
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    /// Copies a conversation log into collaborator form, preserving order.
    pub fn from_log(log: &ConversationLog) -> Vec<Self> {
        log.entries()
            .iter()
            .map(|e| Self::new(e.speaker(), e.text()))
            .collect()
    }
}

/// Request for the structure-and-ask collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRequest {
    /// The three segment texts as currently stored.
    pub segments: StructuredContent,
    /// General content not attributed to a segment.
    pub raw_content: String,
    /// Full dialogue history, oldest first.
    pub history: Vec<Utterance>,
}

impl StructureRequest {
    /// Creates a request with empty history.
    pub fn new(segments: StructuredContent, raw_content: impl Into<String>) -> Self {
        Self {
            segments,
            raw_content: raw_content.into(),
            history: Vec::new(),
        }
    }

    /// Sets the dialogue history.
    pub fn with_history(mut self, history: Vec<Utterance>) -> Self {
        self.history = history;
        self
    }

    /// Builds a request from a diary record's current state.
    pub fn from_record(record: &DiaryRecord) -> Self {
        Self {
            segments: record.segments().content().clone(),
            raw_content: record.segments().raw_content().to_string(),
            history: Utterance::from_log(record.conversation_log()),
        }
    }
}

/// Reply from the structure-and-ask collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureReply {
    /// The collaborator's view of the segment texts, if it restructured
    /// anything. Advisory.
    pub segments: Option<StructuredContent>,
    /// Segments the collaborator considers missing. Advisory.
    pub missing_segments: Vec<Segment>,
    /// Phrasing for the next question about a missing segment.
    pub next_question: Option<String>,
    /// Phrasing for the reflective question, once all segments are filled.
    pub reflective_question: Option<String>,
    /// The phase the collaborator believes the diary is in. Advisory.
    pub phase: Option<DiaryPhase>,
}

impl StructureReply {
    /// Creates an empty reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the next-question phrasing.
    pub fn with_next_question(mut self, question: impl Into<String>) -> Self {
        self.next_question = Some(question.into());
        self
    }

    /// Sets the reflective-question phrasing.
    pub fn with_reflective_question(mut self, question: impl Into<String>) -> Self {
        self.reflective_question = Some(question.into());
        self
    }

    /// Sets the advisory missing-segment list.
    pub fn with_missing_segments(mut self, missing: Vec<Segment>) -> Self {
        self.missing_segments = missing;
        self
    }

    /// Sets the advisory phase.
    pub fn with_phase(mut self, phase: DiaryPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Returns the next-question phrasing if it is usable (non-blank).
    pub fn usable_next_question(&self) -> Option<&str> {
        self.next_question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Returns the reflective-question phrasing if it is usable (non-blank).
    pub fn usable_reflective_question(&self) -> Option<&str> {
        self.reflective_question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}
