//! Completion gate: analysis eligibility and status reads.
//!
//! Analysis runs at most once per completion; the `analyzed` flag on the
//! record enforces this, not the collaborator. Failures leave the flag
//! unset so the caller can retry, synchronously or in the background.

use serde::{Deserialize, Serialize};

use crate::ports::{AnalyzeRequest, DiaryAnalyzer};

use super::analysis::DiaryAnalysis;
use super::errors::DiaryError;
use super::phase::DiaryPhase;
use super::record::DiaryRecord;
use super::segment::Segment;

/// The outcome of a `maybe_analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    /// The record is not yet complete; nothing was done.
    NotReady {
        /// Segments still missing, in canonical order.
        missing_segments: Vec<Segment>,
    },
    /// A valid analysis was already attached; the collaborator was not
    /// invoked again.
    AlreadyAnalyzed(DiaryAnalysis),
    /// The collaborator ran and the analysis was attached.
    Analyzed(DiaryAnalysis),
}

impl AnalyzeOutcome {
    /// Returns the analysis, if one is attached after the call.
    pub fn analysis(&self) -> Option<&DiaryAnalysis> {
        match self {
            AnalyzeOutcome::NotReady { .. } => None,
            AnalyzeOutcome::AlreadyAnalyzed(analysis) | AnalyzeOutcome::Analyzed(analysis) => {
                Some(analysis)
            }
        }
    }
}

/// Pure status snapshot for polling and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStatus {
    /// True if the diary reached completion.
    pub complete: bool,
    /// True if a valid analysis is attached.
    pub analyzed: bool,
    /// Current completion phase.
    pub phase: DiaryPhase,
    /// Segments still missing, in canonical order.
    pub missing_segments: Vec<Segment>,
    /// The question to surface to the user, if any.
    pub pending_question: Option<String>,
}

/// Gate deciding when a diary is analyzed, and reporting progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionGate;

impl CompletionGate {
    /// Creates a new gate.
    pub fn new() -> Self {
        Self
    }

    /// Analyzes the record if it is complete and not yet analyzed.
    ///
    /// A no-op (with a typed outcome) when the record is not eligible.
    /// On collaborator failure the record is left un-analyzed and the
    /// retryable error surfaces to the caller; there is no local fallback
    /// for analysis.
    pub async fn maybe_analyze(
        &self,
        record: &mut DiaryRecord,
        analyzer: &dyn DiaryAnalyzer,
    ) -> Result<AnalyzeOutcome, DiaryError> {
        if !record.phase().is_complete() {
            return Ok(AnalyzeOutcome::NotReady {
                missing_segments: record.missing_segments(),
            });
        }
        if record.is_analyzed() {
            if let Some(analysis) = record.analysis() {
                return Ok(AnalyzeOutcome::AlreadyAnalyzed(analysis.clone()));
            }
        }

        let analysis = analyzer
            .analyze(AnalyzeRequest::from_record(record))
            .await
            .map_err(DiaryError::from)?;

        record.attach_analysis(analysis.clone());
        Ok(AnalyzeOutcome::Analyzed(analysis))
    }

    /// Reports the record's completion and analysis status. Never mutates.
    pub fn analysis_status(&self, record: &DiaryRecord) -> AnalysisStatus {
        AnalysisStatus {
            complete: record.phase().is_complete(),
            analyzed: record.is_analyzed(),
            phase: record.phase(),
            missing_segments: record.missing_segments(),
            pending_question: record.pending_question().map(str::to_string),
        }
    }
}
