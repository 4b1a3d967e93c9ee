//! Command handlers.

pub mod diary;

pub use diary::{
    AnalyzeDiaryCommand, AnalyzeDiaryError, AnalyzeDiaryHandler, AnalyzeDiaryResult,
    GetDiaryStatusCommand, GetDiaryStatusError, GetDiaryStatusHandler, GetDiaryStatusResult,
    StartDiaryCommand, StartDiaryError, StartDiaryHandler, StartDiaryResult,
    SupplementDiaryCommand, SupplementDiaryError, SupplementDiaryHandler, SupplementDiaryResult,
    SupplementSource, UpdateDiaryCommand, UpdateDiaryError, UpdateDiaryHandler, UpdateDiaryResult,
};
