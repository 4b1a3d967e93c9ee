//! Transcriber port - speech-to-text for voice diary supplements.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::diary::DiaryError;

/// Port for transcribing recorded audio into diary text.
///
/// Implementations wrap an external speech-to-text service; the shipped
/// mock adapter serves tests and development.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes an audio recording to text.
    ///
    /// # Errors
    ///
    /// - `EmptyAudio` / `Unintelligible` for unusable input
    /// - `Unavailable` for transient service failures (retryable)
    async fn transcribe(&self, audio: AudioSource) -> Result<Transcript, TranscriptionError>;
}

/// The audio input for a transcription call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Path to an uploaded audio file.
    Path(PathBuf),
    /// Raw audio bytes held in memory.
    Bytes(Vec<u8>),
}

impl AudioSource {
    /// Creates a source from a file path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Creates a source from in-memory bytes.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Returns true if the source holds no audio data at all.
    pub fn is_empty(&self) -> bool {
        match self {
            AudioSource::Path(path) => path.as_os_str().is_empty(),
            AudioSource::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

/// The transcribed text of an audio recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    /// Creates a transcript, rejecting empty text.
    pub fn new(text: impl Into<String>) -> Result<Self, TranscriptionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TranscriptionError::Unintelligible {
                reason: "transcription produced no text".to_string(),
            });
        }
        Ok(Self { text })
    }

    /// Returns the transcribed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the transcript, returning the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Errors from the transcription collaborator.
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    /// No audio data was supplied.
    #[error("audio input is empty")]
    EmptyAudio,

    /// The audio could not be turned into text.
    #[error("audio unintelligible: {reason}")]
    Unintelligible {
        /// What went wrong.
        reason: String,
    },

    /// The transcription service is unavailable (retryable).
    #[error("transcription service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The audio file could not be read.
    #[error("audio read failed: {0}")]
    Io(String),
}

impl TranscriptionError {
    /// Creates an unintelligible-audio error.
    pub fn unintelligible(reason: impl Into<String>) -> Self {
        Self::Unintelligible {
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TranscriptionError::Unavailable { .. })
    }
}

impl From<TranscriptionError> for DiaryError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::Unavailable { message } => {
                DiaryError::collaborator_unavailable(message)
            }
            other => DiaryError::transcription(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_source_emptiness() {
        assert!(AudioSource::bytes(Vec::new()).is_empty());
        assert!(AudioSource::path("").is_empty());
        assert!(!AudioSource::bytes(vec![1, 2, 3]).is_empty());
        assert!(!AudioSource::path("/tmp/voice.webm").is_empty());
    }

    #[test]
    fn transcript_rejects_blank_text() {
        assert!(Transcript::new("  ").is_err());
        let transcript = Transcript::new("I went hiking").unwrap();
        assert_eq!(transcript.text(), "I went hiking");
    }

    #[test]
    fn only_unavailable_is_retryable() {
        assert!(TranscriptionError::unavailable("down").is_retryable());
        assert!(!TranscriptionError::EmptyAudio.is_retryable());
        assert!(!TranscriptionError::unintelligible("static").is_retryable());
        assert!(!TranscriptionError::Io("missing file".to_string()).is_retryable());
    }

    #[test]
    fn unavailable_converts_to_retryable_diary_error() {
        let err: DiaryError = TranscriptionError::unavailable("down").into();
        assert!(err.is_retryable());
    }

    #[test]
    fn unintelligible_converts_to_transcription_diary_error() {
        let err: DiaryError = TranscriptionError::unintelligible("static").into();
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("transcription failed"));
    }
}
