//! Local deterministic collaborator adapters.
//!
//! Offline stand-ins for the model-backed structuring and analysis
//! services: time-of-day bucketing of utterances, emotion detection by
//! lexicon counting, and frequency-based keyword extraction. Useful for
//! development and as a degraded-mode deployment option; the dialogue they
//! produce is intentionally plain.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::domain::diary::{
    DiaryAnalysis, DiaryPhase, EmotionAnalysis, FallbackPrompts, Segment, StructuredContent,
};
use crate::ports::{
    AnalyzeRequest, CollaboratorError, DiaryAnalyzer, DiaryStructurer, StructureReply,
    StructureRequest,
};

/// Words ignored by keyword extraction.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "was", "were", "had", "has", "have", "for", "with", "that", "this",
        "then", "them", "they", "you", "your", "but", "not", "are", "out", "all", "got",
        "get", "just", "really", "very", "about", "after", "before", "into", "some", "when",
        "what", "went", "did", "felt", "today",
    ]
    .into_iter()
    .collect()
});

/// How many keywords to extract at most.
const MAX_KEYWORDS: usize = 5;

/// Maximum length of a per-segment summary.
const SUMMARY_LIMIT: usize = 80;

/// Phrases that assign an utterance to a time-of-day segment.
fn segment_markers(segment: Segment) -> &'static [&'static str] {
    match segment {
        Segment::Morning => &["morning", "woke", "breakfast", "sunrise"],
        Segment::Afternoon => &["afternoon", "noon", "lunch", "midday"],
        Segment::Evening => &["evening", "night", "dinner", "sunset"],
    }
}

/// Emotion markers counted to pick the dominant feeling.
///
/// Explicit configuration data; deployments can extend or replace the
/// marker lists without touching the detection logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionLexicon {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for EmotionLexicon {
    fn default() -> Self {
        let entry = |emotion: &str, markers: &[&str]| {
            (
                emotion.to_string(),
                markers.iter().map(|m| m.to_string()).collect(),
            )
        };
        Self {
            entries: vec![
                entry("happy", &["happy", "glad", "excited", "joy", "fun", "good", "proud"]),
                entry("sad", &["sad", "unhappy", "depressed", "down", "bad", "lonely"]),
                entry("angry", &["angry", "mad", "upset", "frustrated", "annoyed"]),
                entry("anxious", &["anxious", "nervous", "worried", "stressed", "afraid"]),
            ],
        }
    }
}

impl EmotionLexicon {
    /// Creates a lexicon from (emotion, markers) pairs.
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    /// Detects the dominant emotion in the text by marker counting.
    ///
    /// Falls back to neutral when no marker matches.
    pub fn detect(&self, text: &str) -> EmotionAnalysis {
        let lower = text.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for (emotion, markers) in &self.entries {
            let count = markers
                .iter()
                .filter(|marker| lower.contains(marker.as_str()))
                .count();
            if count > 0 && best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((emotion, count));
            }
        }

        match best {
            Some((emotion, count)) => EmotionAnalysis::new(
                emotion,
                format!("{count} matching expression(s) in the diary text"),
            ),
            None => EmotionAnalysis::neutral("no strong emotional signal in the diary text"),
        }
    }
}

/// Deterministic structurer: buckets utterances by time-of-day markers and
/// phrases questions from fixed prompt text.
#[derive(Debug, Clone, Default)]
pub struct HeuristicStructurer {
    prompts: FallbackPrompts,
}

impl HeuristicStructurer {
    /// Creates a structurer with default prompt texts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structurer with custom prompt texts.
    pub fn with_prompts(prompts: FallbackPrompts) -> Self {
        Self { prompts }
    }

    /// Buckets the user's utterances into segments by marker matching.
    ///
    /// Utterances naming no time of day stay out of the buckets; they are
    /// already captured in the raw content.
    fn bucket_history(request: &StructureRequest) -> StructuredContent {
        let mut buckets = request.segments.clone();
        for utterance in request.history.iter().filter(|u| u.speaker.is_user()) {
            let lower = utterance.text.to_lowercase();
            for segment in Segment::ALL {
                let already_stored = buckets.get(segment).contains(utterance.text.trim());
                if already_stored {
                    continue;
                }
                if segment_markers(segment)
                    .iter()
                    .any(|marker| lower.contains(marker))
                {
                    let merged = if buckets.is_blank(segment) {
                        utterance.text.trim().to_string()
                    } else {
                        format!("{} {}", buckets.get(segment).trim(), utterance.text.trim())
                    };
                    buckets.set(segment, merged);
                }
            }
        }
        buckets
    }
}

#[async_trait]
impl DiaryStructurer for HeuristicStructurer {
    async fn structure_and_ask(
        &self,
        request: StructureRequest,
    ) -> Result<StructureReply, CollaboratorError> {
        let buckets = Self::bucket_history(&request);

        let missing: Vec<Segment> = Segment::ALL
            .into_iter()
            .filter(|s| request.segments.is_blank(*s))
            .collect();

        let mut reply = StructureReply::new().with_missing_segments(missing.clone());
        reply.segments = Some(buckets);

        match missing.first() {
            Some(first) => {
                reply = reply
                    .with_next_question(self.prompts.segment_question(*first))
                    .with_phase(DiaryPhase::CollectingInfo);
            }
            None => {
                reply = reply
                    .with_reflective_question(self.prompts.reflective_question.clone())
                    .with_phase(DiaryPhase::AskingReflectiveQuestion);
            }
        }

        Ok(reply)
    }
}

/// Deterministic analyzer: emotion lexicon counting, frequency keywords,
/// truncation summaries.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAnalyzer {
    lexicon: EmotionLexicon,
}

impl HeuristicAnalyzer {
    /// Creates an analyzer with the default emotion lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with a custom emotion lexicon.
    pub fn with_lexicon(lexicon: EmotionLexicon) -> Self {
        Self { lexicon }
    }

    /// Extracts the most frequent non-stopword words from the text.
    fn extract_keywords(text: &str) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for raw in text.to_lowercase().split_whitespace() {
            let word: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
            if word.len() > 2 && !STOPWORDS.contains(word.as_str()) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        // Alphabetical tie-break keeps the output deterministic
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(|(word, _)| word)
            .collect()
    }

    /// Summarizes a segment by truncating at a word boundary.
    fn summarize(text: &str) -> String {
        let text = text.trim();
        if text.len() <= SUMMARY_LIMIT {
            return text.to_string();
        }
        let mut limit = SUMMARY_LIMIT;
        while !text.is_char_boundary(limit) {
            limit -= 1;
        }
        let cut = text[..limit].rfind(' ').unwrap_or(limit);
        format!("{}…", &text[..cut])
    }
}

#[async_trait]
impl DiaryAnalyzer for HeuristicAnalyzer {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<DiaryAnalysis, CollaboratorError> {
        let mut full_text = Segment::ALL
            .into_iter()
            .map(|s| request.segments.get(s).trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !request.raw_content.trim().is_empty() {
            full_text.push(' ');
            full_text.push_str(request.raw_content.trim());
        }
        if let Some((_, answer)) = &request.reflection {
            full_text.push(' ');
            full_text.push_str(answer.trim());
        }

        let summary = StructuredContent {
            morning: Self::summarize(&request.segments.morning),
            afternoon: Self::summarize(&request.segments.afternoon),
            evening: Self::summarize(&request.segments.evening),
        };

        Ok(DiaryAnalysis::new(
            Self::extract_keywords(&full_text),
            summary,
            self.lexicon.detect(&full_text),
        ))
    }
}
