//! In-memory diary repository adapter.
//!
//! Stores diary records in a process-local map. Useful for testing and
//! development; a production deployment plugs a database-backed adapter
//! into the same port and serializes writers per record id there.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::diary::DiaryRecord;
use crate::domain::foundation::{DiaryId, UserId};
use crate::ports::{DiaryRepository, RepositoryError};

/// In-memory storage for diary records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiaryRepository {
    records: Arc<RwLock<HashMap<DiaryId, DiaryRecord>>>,
}

impl InMemoryDiaryRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored records (useful for tests).
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Returns the number of stored records.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl DiaryRepository for InMemoryDiaryRepository {
    async fn find_by_id(
        &self,
        user_id: UserId,
        diary_id: DiaryId,
    ) -> Result<Option<DiaryRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records
            .get(&diary_id)
            .filter(|record| record.user_id() == user_id)
            .cloned())
    }

    async fn save(&self, record: &DiaryRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<DiaryRecord>, RepositoryError> {
        let records = self.records.read().await;
        let mut owned: Vec<DiaryRecord> = records
            .values()
            .filter(|record| record.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_for(user_id: UserId, day: u32) -> DiaryRecord {
        DiaryRecord::new(user_id, NaiveDate::from_ymd_opt(2024, 6, day).unwrap())
    }

    #[tokio::test]
    async fn save_and_find_roundtrips() {
        let repo = InMemoryDiaryRepository::new();
        let user_id = UserId::new();
        let record = record_for(user_id, 1);

        repo.save(&record).await.unwrap();
        let found = repo.find_by_id(user_id, record.id()).await.unwrap();

        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn find_is_scoped_to_the_owner() {
        let repo = InMemoryDiaryRepository::new();
        let owner = UserId::new();
        let record = record_for(owner, 1);
        repo.save(&record).await.unwrap();

        let other_users_view = repo.find_by_id(UserId::new(), record.id()).await.unwrap();

        assert!(other_users_view.is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_record() {
        let repo = InMemoryDiaryRepository::new();
        let user_id = UserId::new();
        let mut record = record_for(user_id, 1);
        repo.save(&record).await.unwrap();

        record.set_title(Some("Rewritten".to_string()));
        repo.save(&record).await.unwrap();

        let found = repo.find_by_id(user_id, record.id()).await.unwrap().unwrap();
        assert_eq!(found.title(), Some("Rewritten"));
        assert_eq!(repo.record_count().await, 1);
    }

    #[tokio::test]
    async fn list_returns_most_recent_date_first() {
        let repo = InMemoryDiaryRepository::new();
        let user_id = UserId::new();
        repo.save(&record_for(user_id, 3)).await.unwrap();
        repo.save(&record_for(user_id, 12)).await.unwrap();
        repo.save(&record_for(user_id, 7)).await.unwrap();
        // Another user's record is not listed
        repo.save(&record_for(UserId::new(), 20)).await.unwrap();

        let listed = repo.list_for_user(user_id).await.unwrap();

        let days: Vec<u32> = listed
            .iter()
            .map(|r| chrono::Datelike::day(&r.date()))
            .collect();
        assert_eq!(days, vec![12, 7, 3]);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let repo = InMemoryDiaryRepository::new();
        repo.save(&record_for(UserId::new(), 1)).await.unwrap();
        assert_eq!(repo.record_count().await, 1);

        repo.clear().await;
        assert_eq!(repo.record_count().await, 0);
    }
}
