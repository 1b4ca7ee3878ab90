//! In-memory [`ProgressionStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{DailyBudgets, ProgressionFields, ProgressionStore, RecordFilter};
use super::{ProgressionError, ProgressionRecord};
use crate::types::DbId;

/// Keeps records in a map behind a lock. Each call holds the lock for its
/// whole read-check-write, which gives the per-row atomicity the trait asks for.
#[derive(Debug, Default)]
pub struct InMemoryProgressionStore {
    records: RwLock<HashMap<DbId, ProgressionRecord>>,
}

impl InMemoryProgressionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record as-is.
    pub async fn insert(&self, record: ProgressionRecord) {
        self.records.write().await.insert(record.user_id, record);
    }

    /// Remove a record, as account deletion would.
    pub async fn remove(&self, user_id: DbId) -> Option<ProgressionRecord> {
        self.records.write().await.remove(&user_id)
    }

    pub async fn get(&self, user_id: DbId) -> Option<ProgressionRecord> {
        self.records.read().await.get(&user_id).copied()
    }
}

#[async_trait]
impl ProgressionStore for InMemoryProgressionStore {
    async fn load(&self, user_id: DbId) -> Result<Option<ProgressionRecord>, ProgressionError> {
        Ok(self.get(user_id).await)
    }

    async fn update_fields(
        &self,
        user_id: DbId,
        expected_version: i64,
        fields: &ProgressionFields,
    ) -> Result<ProgressionRecord, ProgressionError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(ProgressionError::NotFound { user_id })?;

        if record.progress_version != expected_version {
            return Err(ProgressionError::Conflict { user_id });
        }

        *record = ProgressionRecord {
            user_id,
            level: fields.level,
            experience_points: fields.experience_points,
            experience_for_day: fields.experience_for_day,
            buddy_level: fields.buddy_level,
            buddy_experience_points: fields.buddy_experience_points,
            buddy_experience_for_day: fields.buddy_experience_for_day,
            progress_version: record.progress_version + 1,
        };
        Ok(*record)
    }

    async fn update_where(
        &self,
        filter: RecordFilter,
        budgets: DailyBudgets,
    ) -> Result<u64, ProgressionError> {
        let mut records = self.records.write().await;
        let mut touched = 0;
        for record in records.values_mut().filter(|r| filter.matches(r)) {
            record.experience_for_day = budgets.experience_for_day;
            record.buddy_experience_for_day = budgets.buddy_experience_for_day;
            record.progress_version += 1;
            touched += 1;
        }
        Ok(touched)
    }
}
