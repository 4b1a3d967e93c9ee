//! Diary record aggregate.
//!
//! A `DiaryRecord` owns the segment store, the conversation log, the
//! completion phase and the analysis staleness flag. All mutations go
//! through methods that keep the phase invariants intact:
//!
//! - `Complete` ⟺ all segments filled ∧ reflective answer recorded
//! - `AskingReflectiveQuestion` ⟺ all segments filled ∧ answer pending
//! - `CollectingInfo` ⟺ at least one segment missing
//!
//! The phase is recomputed from these facts after every content mutation,
//! so an edit that empties a segment re-opens a completed record. Any
//! change to segment or general content invalidates a previously attached
//! analysis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DiaryId, StateMachine, Timestamp, UserId};

use super::analysis::DiaryAnalysis;
use super::entry::{ConversationEntry, ConversationLog};
use super::errors::DiaryError;
use super::phase::DiaryPhase;
use super::segment::{Segment, SegmentStore, SupplementTarget};

/// A single diary record moving through the completion flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRecord {
    id: DiaryId,
    user_id: UserId,
    date: NaiveDate,
    title: Option<String>,
    segments: SegmentStore,
    conversation_log: ConversationLog,
    phase: DiaryPhase,
    pending_question: Option<String>,
    reflective_question: Option<String>,
    reflective_answer: Option<String>,
    analysis: Option<DiaryAnalysis>,
    analyzed: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl DiaryRecord {
    /// Creates an empty record for the given owner and date.
    ///
    /// All segments start empty, so the record begins in CollectingInfo.
    pub fn new(user_id: UserId, date: NaiveDate) -> Self {
        let now = Timestamp::now();
        Self {
            id: DiaryId::new(),
            user_id,
            date,
            title: None,
            segments: SegmentStore::new(),
            conversation_log: ConversationLog::new(),
            phase: DiaryPhase::CollectingInfo,
            pending_question: None,
            reflective_question: None,
            reflective_answer: None,
            analysis: None,
            analyzed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the title during construction.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reconstitutes a record from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DiaryId,
        user_id: UserId,
        date: NaiveDate,
        title: Option<String>,
        segments: SegmentStore,
        conversation_log: ConversationLog,
        phase: DiaryPhase,
        pending_question: Option<String>,
        reflective_question: Option<String>,
        reflective_answer: Option<String>,
        analysis: Option<DiaryAnalysis>,
        analyzed: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            title,
            segments,
            conversation_log,
            phase,
            pending_question,
            reflective_question,
            reflective_answer,
            analysis,
            analyzed,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the record ID.
    pub fn id(&self) -> DiaryId {
        self.id
    }

    /// Returns the owning user's ID.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the diary date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the title, if set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the segment store.
    pub fn segments(&self) -> &SegmentStore {
        &self.segments
    }

    /// Returns the conversation log.
    pub fn conversation_log(&self) -> &ConversationLog {
        &self.conversation_log
    }

    /// Returns the current phase.
    pub fn phase(&self) -> DiaryPhase {
        self.phase
    }

    /// Returns the question to surface to the user next, if any.
    pub fn pending_question(&self) -> Option<&str> {
        self.pending_question.as_deref()
    }

    /// Returns the reflective question, once chosen.
    pub fn reflective_question(&self) -> Option<&str> {
        self.reflective_question.as_deref()
    }

    /// Returns the user's reflective answer, once given.
    pub fn reflective_answer(&self) -> Option<&str> {
        self.reflective_answer.as_deref()
    }

    /// Returns the attached analysis, if present and still valid.
    pub fn analysis(&self) -> Option<&DiaryAnalysis> {
        self.analysis.as_ref()
    }

    /// Returns true if an analysis is attached and still valid for the
    /// current content.
    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }

    /// Returns when the record was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the record was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the segments still missing content, in canonical order.
    pub fn missing_segments(&self) -> Vec<Segment> {
        self.segments.missing_segments()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Applies a piece of supplemental content to the record.
    ///
    /// Segment targets append (never overwrite), `General` appends to the
    /// raw content log, and `QuestionResponse` records the reflective
    /// answer. The phase is recomputed afterwards, and any attached
    /// analysis is invalidated by content changes.
    ///
    /// # Errors
    ///
    /// - `EmptyContent` if text is empty or whitespace-only
    /// - `PhaseViolation` if a reflective answer is supplied outside
    ///   AskingReflectiveQuestion or a second time
    pub fn apply_content(
        &mut self,
        target: SupplementTarget,
        text: &str,
    ) -> Result<(), DiaryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DiaryError::EmptyContent);
        }

        match target {
            SupplementTarget::Morning => {
                self.segments.append_segment(Segment::Morning, text);
                self.invalidate_analysis();
            }
            SupplementTarget::Afternoon => {
                self.segments.append_segment(Segment::Afternoon, text);
                self.invalidate_analysis();
            }
            SupplementTarget::Evening => {
                self.segments.append_segment(Segment::Evening, text);
                self.invalidate_analysis();
            }
            SupplementTarget::General => {
                self.segments.append_general(text);
                self.invalidate_analysis();
            }
            SupplementTarget::QuestionResponse => {
                if !self.phase.expects_reflective_answer() {
                    return Err(DiaryError::phase_violation(
                        "apply_content",
                        self.phase,
                        "no reflective question is pending",
                    ));
                }
                if self.reflective_answer.is_some() {
                    return Err(DiaryError::phase_violation(
                        "apply_content",
                        self.phase,
                        "reflective answer already recorded",
                    ));
                }
                self.reflective_answer = Some(text.to_string());
            }
        }

        self.recompute_phase();
        self.touch();
        Ok(())
    }

    /// Replaces a segment's text wholesale (diary edit).
    ///
    /// An empty replacement empties the segment and re-opens the record to
    /// CollectingInfo. Any attached analysis is invalidated.
    pub fn replace_segment(&mut self, segment: Segment, text: &str) {
        self.segments.replace_segment(segment, text);
        self.invalidate_analysis();
        self.recompute_phase();
        self.touch();
    }

    /// Updates the title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
        self.touch();
    }

    /// Updates the diary date.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.touch();
    }

    /// Appends an entry to the conversation log.
    pub fn append_conversation(&mut self, entry: ConversationEntry) {
        self.conversation_log.append(entry);
        self.touch();
    }

    /// Sets the question to surface to the user next.
    pub fn set_pending_question(&mut self, question: impl Into<String>) {
        self.pending_question = Some(question.into());
    }

    /// Records the chosen reflective question.
    pub fn set_reflective_question(&mut self, question: impl Into<String>) {
        self.reflective_question = Some(question.into());
    }

    /// Attaches an analysis result and marks the record analyzed.
    ///
    /// Eligibility (phase Complete, not already analyzed) is the
    /// completion gate's responsibility.
    pub fn attach_analysis(&mut self, analysis: DiaryAnalysis) {
        self.analysis = Some(analysis);
        self.analyzed = true;
        self.touch();
    }

    /// Returns true if the stored phase matches the phase implied by the
    /// record's facts.
    pub fn phase_is_consistent(&self) -> bool {
        self.phase
            == DiaryPhase::derived(self.segments.is_filled(), self.reflective_answer.is_some())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    fn recompute_phase(&mut self) {
        let next =
            DiaryPhase::derived(self.segments.is_filled(), self.reflective_answer.is_some());
        if next != self.phase {
            // Fact-derived targets always lie within the valid transition set:
            // the answer is never unset and segments only empty via edits.
            debug_assert!(
                self.phase.can_transition_to(&next),
                "derived phase {:?} unreachable from {:?}",
                next,
                self.phase
            );
            self.phase = next;
        }
        if !self.phase.carries_question() {
            self.pending_question = None;
        }
    }

    fn invalidate_analysis(&mut self) {
        self.analysis = None;
        self.analyzed = false;
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
