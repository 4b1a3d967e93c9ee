//! AI-generated analysis of a completed diary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::segment::StructuredContent;

/// Detected emotion and its supporting reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    /// Dominant emotion, e.g. "happy", "sad", "anxious", "neutral".
    pub emotion: String,
    /// Short explanation of why this emotion was detected.
    pub reason: String,
}

impl EmotionAnalysis {
    /// Creates a new emotion analysis.
    pub fn new(emotion: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            emotion: emotion.into(),
            reason: reason.into(),
        }
    }

    /// Creates a neutral analysis with the given reason.
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self::new("neutral", reason)
    }
}

/// The full analysis result attached to a completed diary.
///
/// Produced at most once per completion by the analyze collaborator and
/// invalidated whenever the diary's content changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryAnalysis {
    /// Keywords extracted from the diary content, deduplicated and ordered.
    pub keywords: BTreeSet<String>,
    /// A short summary per time-of-day segment.
    pub summary: StructuredContent,
    /// Detected emotion with reasoning.
    pub feelings: EmotionAnalysis,
}

impl DiaryAnalysis {
    /// Creates a new analysis result.
    pub fn new(
        keywords: impl IntoIterator<Item = String>,
        summary: StructuredContent,
        feelings: EmotionAnalysis,
    ) -> Self {
        Self {
            keywords: keywords.into_iter().collect(),
            summary,
            feelings,
        }
    }
}
