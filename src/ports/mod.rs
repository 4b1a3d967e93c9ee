//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `Transcriber` - Speech-to-text for voice diary supplements
//! - `DiaryStructurer` - Structures diary content and phrases the next question
//! - `DiaryAnalyzer` - Produces the final analysis of a completed diary
//!
//! ## Persistence Ports
//!
//! - `DiaryRepository` - Load/save of diary records; the persistence
//!   mechanism itself is the caller's concern

mod analyzer;
mod collaborator;
mod diary_repository;
mod structurer;
mod transcriber;

pub use analyzer::{AnalyzeRequest, DiaryAnalyzer};
pub use collaborator::CollaboratorError;
pub use diary_repository::{DiaryRepository, RepositoryError};
pub use structurer::{DiaryStructurer, StructureReply, StructureRequest, Utterance};
pub use transcriber::{AudioSource, Transcriber, Transcript, TranscriptionError};
