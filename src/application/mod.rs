//! Application layer - Commands and Handlers.
//!
//! Orchestrates domain operations and coordinates between ports. Each
//! handler owns one use case and is generic over the ports it needs.

pub mod handlers;

pub use handlers::{
    AnalyzeDiaryCommand, AnalyzeDiaryError, AnalyzeDiaryHandler, AnalyzeDiaryResult,
    GetDiaryStatusCommand, GetDiaryStatusError, GetDiaryStatusHandler, GetDiaryStatusResult,
    StartDiaryCommand, StartDiaryError, StartDiaryHandler, StartDiaryResult,
    SupplementDiaryCommand, SupplementDiaryError, SupplementDiaryHandler, SupplementDiaryResult,
    SupplementSource, UpdateDiaryCommand, UpdateDiaryError, UpdateDiaryHandler, UpdateDiaryResult,
};
