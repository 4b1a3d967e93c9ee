//! Collaborator adapters.
//!
//! - `mock` - Configurable mocks for tests (queued replies, error
//!   injection, call tracking)
//! - `heuristic` - Local deterministic structuring and analysis, usable
//!   offline and as a development stand-in for the model-backed service

mod heuristic;
mod mock;

pub use heuristic::{EmotionLexicon, HeuristicAnalyzer, HeuristicStructurer};
pub use mock::{MockAnalyzer, MockStructurer, MockTranscriber};
