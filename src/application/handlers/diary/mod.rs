//! Diary use-case handlers.
//!
//! - `StartDiary` - Create a record, optionally seeded with a first utterance
//! - `SupplementDiary` - Feed typed or voice content into the completion flow
//! - `UpdateDiary` - Edit metadata or rewrite segments
//! - `AnalyzeDiary` - Run the completion gate's analysis
//! - `GetDiaryStatus` - Poll completion/analysis progress

mod analyze_diary;
mod diary_status;
mod start_diary;
mod supplement_diary;
mod update_diary;

pub use analyze_diary::{
    AnalyzeDiaryCommand, AnalyzeDiaryError, AnalyzeDiaryHandler, AnalyzeDiaryResult,
};
pub use diary_status::{
    GetDiaryStatusCommand, GetDiaryStatusError, GetDiaryStatusHandler, GetDiaryStatusResult,
};
pub use start_diary::{StartDiaryCommand, StartDiaryError, StartDiaryHandler, StartDiaryResult};
pub use supplement_diary::{
    SupplementDiaryCommand, SupplementDiaryError, SupplementDiaryHandler, SupplementDiaryResult,
    SupplementSource,
};
pub use update_diary::{
    UpdateDiaryCommand, UpdateDiaryError, UpdateDiaryHandler, UpdateDiaryResult,
};
