//! Time-of-day segments and the segment store.
//!
//! A diary entry is structured into three fixed buckets (morning, afternoon,
//! evening) plus a free-form general log. The canonical segment order is the
//! tie-break for "what to ask about next".

use serde::{Deserialize, Serialize};

/// One of the three fixed time-of-day buckets of a diary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Morning,
    Afternoon,
    Evening,
}

impl Segment {
    /// All segments in canonical order. Missing-segment reporting and
    /// question selection always follow this order.
    pub const ALL: [Segment; 3] = [Segment::Morning, Segment::Afternoon, Segment::Evening];

    /// Returns a lowercase label for the segment, suitable for prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Morning => "morning",
            Segment::Afternoon => "afternoon",
            Segment::Evening => "evening",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where a piece of supplemental diary content should be applied.
///
/// Wire strings match the original supplement API
/// (`morning`/`afternoon`/`evening`/`general`/`question_response`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementTarget {
    Morning,
    Afternoon,
    Evening,
    /// Content not attributable to a specific time of day.
    General,
    /// The user's answer to the reflective question.
    QuestionResponse,
}

impl SupplementTarget {
    /// Returns the segment this target addresses, if any.
    pub fn as_segment(&self) -> Option<Segment> {
        match self {
            SupplementTarget::Morning => Some(Segment::Morning),
            SupplementTarget::Afternoon => Some(Segment::Afternoon),
            SupplementTarget::Evening => Some(Segment::Evening),
            SupplementTarget::General | SupplementTarget::QuestionResponse => None,
        }
    }
}

impl From<Segment> for SupplementTarget {
    fn from(segment: Segment) -> Self {
        match segment {
            Segment::Morning => SupplementTarget::Morning,
            Segment::Afternoon => SupplementTarget::Afternoon,
            Segment::Evening => SupplementTarget::Evening,
        }
    }
}

/// The three segment texts of a diary entry.
///
/// Plain data, shared between the segment store, collaborator requests, and
/// per-segment analysis summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
}

impl StructuredContent {
    /// Returns the text for a segment.
    pub fn get(&self, segment: Segment) -> &str {
        match segment {
            Segment::Morning => &self.morning,
            Segment::Afternoon => &self.afternoon,
            Segment::Evening => &self.evening,
        }
    }

    /// Sets the text for a segment.
    pub fn set(&mut self, segment: Segment, text: impl Into<String>) {
        match segment {
            Segment::Morning => self.morning = text.into(),
            Segment::Afternoon => self.afternoon = text.into(),
            Segment::Evening => self.evening = text.into(),
        }
    }

    /// Returns true if the segment's text is empty or whitespace-only.
    pub fn is_blank(&self, segment: Segment) -> bool {
        self.get(segment).trim().is_empty()
    }
}

/// Holds the segment texts and the general content log for one diary record.
///
/// Content is append-only through [`SegmentStore::append_segment`] and
/// [`SegmentStore::append_general`]; replacing a segment wholesale is a
/// separate, deliberate operation used by diary edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStore {
    content: StructuredContent,
    raw_content: String,
}

/// Separator inserted when appending to a segment that already has content.
const JOIN_SEPARATOR: &str = " ";

impl SegmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes a store from persisted parts.
    pub fn from_parts(content: StructuredContent, raw_content: String) -> Self {
        Self { content, raw_content }
    }

    /// Returns the segment texts.
    pub fn content(&self) -> &StructuredContent {
        &self.content
    }

    /// Returns the general content log.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Appends text to a segment, joining with a separator if the segment
    /// already has content. Existing content is never overwritten.
    pub fn append_segment(&mut self, segment: Segment, text: &str) {
        let merged = Self::join(self.content.get(segment), text);
        self.content.set(segment, merged);
    }

    /// Appends text to the general content log.
    pub fn append_general(&mut self, text: &str) {
        self.raw_content = Self::join(&self.raw_content, text);
    }

    /// Replaces a segment's text wholesale. An empty replacement empties
    /// the segment.
    pub fn replace_segment(&mut self, segment: Segment, text: &str) {
        self.content.set(segment, text.trim());
    }

    /// Returns the segments whose text is empty or whitespace-only, in
    /// canonical order.
    pub fn missing_segments(&self) -> Vec<Segment> {
        Segment::ALL
            .into_iter()
            .filter(|s| self.content.is_blank(*s))
            .collect()
    }

    /// Returns true if every segment has content.
    pub fn is_filled(&self) -> bool {
        self.missing_segments().is_empty()
    }

    /// Joins all non-blank content (segments in canonical order, then the
    /// general log) into one text, for collaborator input.
    pub fn joined_text(&self) -> String {
        let mut parts: Vec<&str> = Segment::ALL
            .into_iter()
            .map(|s| self.content.get(s).trim())
            .filter(|t| !t.is_empty())
            .collect();
        let raw = self.raw_content.trim();
        if !raw.is_empty() {
            parts.push(raw);
        }
        parts.join("\n")
    }

    fn join(existing: &str, addition: &str) -> String {
        let existing = existing.trim();
        let addition = addition.trim();
        if existing.is_empty() {
            addition.to_string()
        } else {
            format!("{existing}{JOIN_SEPARATOR}{addition}")
        }
    }
}
