//! Mock collaborator adapters for testing.
//!
//! Configurable implementations of the `Transcriber`, `DiaryStructurer`
//! and `DiaryAnalyzer` ports, allowing tests to run without external
//! services.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for resilience testing
//! - Call tracking for verification
//! - Simulated delays for timeout testing

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::diary::DiaryAnalysis;
use crate::ports::{
    AnalyzeRequest, AudioSource, CollaboratorError, DiaryAnalyzer, DiaryStructurer,
    StructureReply, StructureRequest, Transcriber, Transcript, TranscriptionError,
};

/// Mock transcriber.
///
/// Returns queued transcripts in order; an empty queue yields a default
/// transcript. Empty audio always fails with `EmptyAudio`.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    replies: Arc<Mutex<VecDeque<Result<String, TranscriptionError>>>>,
    calls: Arc<Mutex<Vec<AudioSource>>>,
    delay: Duration,
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscriber {
    /// Creates a new mock transcriber.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a transcript to return.
    pub fn with_transcript(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queues an error to return.
    pub fn with_error(self, error: TranscriptionError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio: AudioSource) -> Result<Transcript, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        self.calls.lock().unwrap().push(audio);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Transcript::new(text),
            Some(Err(err)) => Err(err),
            None => Transcript::new("mock transcript"),
        }
    }
}

/// Mock structurer.
///
/// Returns queued replies in order; an empty queue yields an empty reply
/// (which drives the engine to its fallback questions).
#[derive(Debug, Clone)]
pub struct MockStructurer {
    replies: Arc<Mutex<VecDeque<Result<StructureReply, CollaboratorError>>>>,
    calls: Arc<Mutex<Vec<StructureRequest>>>,
    delay: Duration,
}

impl Default for MockStructurer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStructurer {
    /// Creates a new mock structurer.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a reply to return.
    pub fn with_reply(self, reply: StructureReply) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply));
        self
    }

    /// Queues an error to return.
    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<StructureRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiaryStructurer for MockStructurer {
    async fn structure_and_ask(
        &self,
        request: StructureRequest,
    ) -> Result<StructureReply, CollaboratorError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(reply) => reply,
            None => Ok(StructureReply::new()),
        }
    }
}

/// Mock analyzer.
///
/// Returns queued results in order; an empty queue yields a minimal
/// default analysis.
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    replies: Arc<Mutex<VecDeque<Result<DiaryAnalysis, CollaboratorError>>>>,
    calls: Arc<Mutex<Vec<AnalyzeRequest>>>,
    delay: Duration,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalyzer {
    /// Creates a new mock analyzer.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues an analysis to return.
    pub fn with_analysis(self, analysis: DiaryAnalysis) -> Self {
        self.replies.lock().unwrap().push_back(Ok(analysis));
        self
    }

    /// Queues an error to return.
    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<AnalyzeRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiaryAnalyzer for MockAnalyzer {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<DiaryAnalysis, CollaboratorError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(reply) => reply,
            None => Ok(DiaryAnalysis::new(
                vec!["diary".to_string()],
                Default::default(),
                crate::domain::diary::EmotionAnalysis::neutral("mock analysis"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diary::{EmotionAnalysis, StructuredContent};

    #[tokio::test]
    async fn transcriber_returns_queued_transcripts_in_order() {
        let transcriber = MockTranscriber::new()
            .with_transcript("first recording")
            .with_transcript("second recording");

        let audio = AudioSource::bytes(vec![1, 2, 3]);
        let t1 = transcriber.transcribe(audio.clone()).await.unwrap();
        let t2 = transcriber.transcribe(audio.clone()).await.unwrap();
        let t3 = transcriber.transcribe(audio).await.unwrap();

        assert_eq!(t1.text(), "first recording");
        assert_eq!(t2.text(), "second recording");
        assert_eq!(t3.text(), "mock transcript"); // Default
        assert_eq!(transcriber.call_count(), 3);
    }

    #[tokio::test]
    async fn transcriber_rejects_empty_audio() {
        let transcriber = MockTranscriber::new().with_transcript("never used");

        let result = transcriber.transcribe(AudioSource::bytes(Vec::new())).await;

        assert!(matches!(result, Err(TranscriptionError::EmptyAudio)));
        assert_eq!(transcriber.call_count(), 0);
    }

    #[tokio::test]
    async fn transcriber_returns_queued_error() {
        let transcriber =
            MockTranscriber::new().with_error(TranscriptionError::unintelligible("static"));

        let result = transcriber
            .transcribe(AudioSource::path("/tmp/voice.webm"))
            .await;

        assert!(matches!(
            result,
            Err(TranscriptionError::Unintelligible { .. })
        ));
    }

    #[tokio::test]
    async fn structurer_returns_queued_replies_then_default() {
        let structurer = MockStructurer::new()
            .with_reply(StructureReply::new().with_next_question("How was lunch?"));

        let request = StructureRequest::new(StructuredContent::default(), "");
        let r1 = structurer.structure_and_ask(request.clone()).await.unwrap();
        let r2 = structurer.structure_and_ask(request).await.unwrap();

        assert_eq!(r1.usable_next_question(), Some("How was lunch?"));
        assert_eq!(r2, StructureReply::new());
        assert_eq!(structurer.call_count(), 2);
    }

    #[tokio::test]
    async fn structurer_records_requests() {
        let structurer = MockStructurer::new();
        let request = StructureRequest::new(
            StructuredContent {
                morning: "a run".to_string(),
                ..Default::default()
            },
            "",
        );

        structurer.structure_and_ask(request).await.unwrap();

        let recorded = structurer.requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].segments.morning, "a run");
    }

    #[tokio::test]
    async fn analyzer_returns_queued_error_then_analysis() {
        let analyzer = MockAnalyzer::new()
            .with_error(CollaboratorError::unavailable("down"))
            .with_analysis(DiaryAnalysis::new(
                vec!["run".to_string()],
                StructuredContent::default(),
                EmotionAnalysis::new("happy", "positive words"),
            ));

        let request = AnalyzeRequest::new(StructuredContent::default(), "");
        let first = analyzer.analyze(request.clone()).await;
        let second = analyzer.analyze(request).await.unwrap();

        assert!(first.is_err());
        assert_eq!(second.feelings.emotion, "happy");
        assert_eq!(analyzer.call_count(), 2);
    }

    #[tokio::test]
    async fn mocks_respect_delay() {
        let structurer = MockStructurer::new().with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        structurer
            .structure_and_ask(StructureRequest::new(StructuredContent::default(), ""))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
