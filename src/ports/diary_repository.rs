//! Diary repository port.
//!
//! Load/save of diary records. The persistence mechanism (and with it the
//! single-writer serialization per record id) is the caller's concern; this
//! crate ships an in-memory adapter for tests and development. Record
//! deletion is likewise an external concern and not part of the port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::diary::DiaryRecord;
use crate::domain::foundation::{DiaryId, UserId};

/// Port for diary record persistence.
#[async_trait]
pub trait DiaryRepository: Send + Sync {
    /// Finds a record by id, scoped to its owner.
    ///
    /// Returns `Ok(None)` when the record does not exist or belongs to a
    /// different user.
    async fn find_by_id(
        &self,
        user_id: UserId,
        diary_id: DiaryId,
    ) -> Result<Option<DiaryRecord>, RepositoryError>;

    /// Saves a record, inserting or replacing the stored version.
    async fn save(&self, record: &DiaryRecord) -> Result<(), RepositoryError>;

    /// Lists a user's records, most recent diary date first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<DiaryRecord>, RepositoryError>;
}

/// Errors from diary persistence.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl RepositoryError {
    /// Creates a storage failure error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
