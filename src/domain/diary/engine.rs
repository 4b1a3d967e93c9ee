//! Transition engine for the diary completion flow.
//!
//! Merges supplemental content into a record, recomputes the phase, and
//! decides what the assistant says next. Question phrasing comes from the
//! structuring collaborator; on collaborator failure the engine degrades to
//! fixed local question text so the user-facing flow continues.
//!
//! All work is staged on a clone of the record and committed only on
//! success, so an abandoned or failed ingest leaves no observable partial
//! transition.

use serde::{Deserialize, Serialize};

use crate::ports::{DiaryStructurer, StructureRequest};

use super::entry::ConversationEntry;
use super::errors::DiaryError;
use super::phase::DiaryPhase;
use super::record::DiaryRecord;
use super::segment::{Segment, SupplementTarget};

/// Fixed local question texts used when the structuring collaborator is
/// unavailable, plus the closing acknowledgment.
///
/// Kept as explicit configuration data so deployments can re-word the
/// degraded-mode dialogue without touching the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPrompts {
    /// Question asked when the morning segment is missing.
    pub morning_question: String,
    /// Question asked when the afternoon segment is missing.
    pub afternoon_question: String,
    /// Question asked when the evening segment is missing.
    pub evening_question: String,
    /// Reflective question asked once all segments are filled.
    pub reflective_question: String,
    /// Acknowledgment appended when the diary reaches completion.
    pub completion_ack: String,
}

impl Default for FallbackPrompts {
    fn default() -> Self {
        Self {
            morning_question: "What did you do in the morning?".to_string(),
            afternoon_question: "What did you do in the afternoon?".to_string(),
            evening_question: "What did you do in the evening?".to_string(),
            reflective_question: "What was the most meaningful moment of your day?".to_string(),
            completion_ack: "Your diary for today is complete. Thank you for sharing your day."
                .to_string(),
        }
    }
}

impl FallbackPrompts {
    /// Returns the fallback question for a missing segment.
    pub fn segment_question(&self, segment: Segment) -> &str {
        match segment {
            Segment::Morning => &self.morning_question,
            Segment::Afternoon => &self.afternoon_question,
            Segment::Evening => &self.evening_question,
        }
    }
}

/// The outcome of an ingest, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// Phase after the transition.
    pub phase: DiaryPhase,
    /// Segments still missing, in canonical order.
    pub missing_segments: Vec<Segment>,
    /// The question to surface to the user, if any.
    pub next_question: Option<String>,
}

impl IngestOutcome {
    /// Returns true if the diary reached completion.
    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }
}

/// Engine that applies supplements and drives phase transitions.
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    prompts: FallbackPrompts,
}

impl TransitionEngine {
    /// Creates an engine with the default fallback prompts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom fallback prompts.
    pub fn with_prompts(prompts: FallbackPrompts) -> Self {
        Self { prompts }
    }

    /// Returns the engine's fallback prompts.
    pub fn prompts(&self) -> &FallbackPrompts {
        &self.prompts
    }

    /// Applies a supplement to the record and advances the completion flow.
    ///
    /// Appends the user's utterance and the assistant's resulting question
    /// or acknowledgment to the conversation log. The record is only
    /// modified if the whole ingest succeeds.
    ///
    /// # Errors
    ///
    /// - `EmptyContent` / `PhaseViolation` from content application; the
    ///   record is left unchanged
    ///
    /// Structurer failures never fail the ingest; the engine logs them and
    /// falls back to its fixed question text.
    pub async fn ingest(
        &self,
        record: &mut DiaryRecord,
        target: SupplementTarget,
        text: &str,
        structurer: &dyn DiaryStructurer,
    ) -> Result<IngestOutcome, DiaryError> {
        let mut staged = record.clone();

        staged.apply_content(target, text)?;
        let user_entry =
            ConversationEntry::user(text.trim()).map_err(|_| DiaryError::EmptyContent)?;
        staged.append_conversation(user_entry);

        let missing = staged.missing_segments();
        let assistant_turn = if let Some(first_missing) = missing.first().copied() {
            let question = self
                .ask_for_segment(&staged, first_missing, structurer)
                .await;
            staged.set_pending_question(question.clone());
            question
        } else if staged.reflective_answer().is_none() {
            if staged.reflective_question().is_none() {
                let question = self.ask_reflective(&staged, structurer).await;
                staged.set_reflective_question(question);
            }
            let question = staged
                .reflective_question()
                .unwrap_or(&self.prompts.reflective_question)
                .to_string();
            staged.set_pending_question(question.clone());
            question
        } else {
            // Complete; apply_content already cleared the pending question
            self.prompts.completion_ack.clone()
        };

        let assistant_entry = ConversationEntry::assistant(&assistant_turn)
            .map_err(|_| DiaryError::EmptyContent)?;
        staged.append_conversation(assistant_entry);

        let outcome = IngestOutcome {
            phase: staged.phase(),
            missing_segments: missing,
            next_question: staged.pending_question().map(str::to_string),
        };

        *record = staged;
        Ok(outcome)
    }

    /// Obtains phrasing for a missing-segment question, degrading to the
    /// fixed fallback for that segment.
    async fn ask_for_segment(
        &self,
        record: &DiaryRecord,
        segment: Segment,
        structurer: &dyn DiaryStructurer,
    ) -> String {
        match structurer
            .structure_and_ask(StructureRequest::from_record(record))
            .await
        {
            Ok(reply) => reply
                .usable_next_question()
                .map(str::to_string)
                .unwrap_or_else(|| self.prompts.segment_question(segment).to_string()),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    segment = %segment,
                    "structurer failed, falling back to fixed question"
                );
                self.prompts.segment_question(segment).to_string()
            }
        }
    }

    /// Obtains phrasing for the reflective question, degrading to the fixed
    /// fallback.
    async fn ask_reflective(
        &self,
        record: &DiaryRecord,
        structurer: &dyn DiaryStructurer,
    ) -> String {
        match structurer
            .structure_and_ask(StructureRequest::from_record(record))
            .await
        {
            Ok(reply) => reply
                .usable_reflective_question()
                .map(str::to_string)
                .unwrap_or_else(|| self.prompts.reflective_question.clone()),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "structurer failed, falling back to fixed reflective question"
                );
                self.prompts.reflective_question.clone()
            }
        }
    }
}
