//! Persistence seam for progression records.

use async_trait::async_trait;
use serde::Serialize;

use super::{ProgressionError, ProgressionRecord};
use crate::types::DbId;

/// Progression fields written back by a single award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressionFields {
    pub level: i32,
    pub experience_points: i32,
    pub experience_for_day: i32,
    pub buddy_level: i32,
    pub buddy_experience_points: i32,
    pub buddy_experience_for_day: i32,
}

/// Both daily budget columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyBudgets {
    pub experience_for_day: i32,
    pub buddy_experience_for_day: i32,
}

/// Row selection for bulk budget updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFilter {
    All,
    BuddyLevelAtLeast(i32),
}

impl RecordFilter {
    pub fn matches(&self, record: &ProgressionRecord) -> bool {
        match self {
            Self::All => true,
            Self::BuddyLevelAtLeast(min) => record.buddy_level >= *min,
        }
    }
}

/// Storage operations the engine and sweeper depend on.
///
/// Every write bumps `progress_version`. Implementations must apply each
/// call atomically per row.
#[async_trait]
pub trait ProgressionStore: Send + Sync {
    /// Load the record for `user_id`, or `None` if the user does not exist.
    async fn load(&self, user_id: DbId) -> Result<Option<ProgressionRecord>, ProgressionError>;

    /// Write `fields` if the stored version still equals `expected_version`.
    ///
    /// Fails with [`ProgressionError::NotFound`] when the user is gone and
    /// [`ProgressionError::Conflict`] when the version moved on.
    async fn update_fields(
        &self,
        user_id: DbId,
        expected_version: i64,
        fields: &ProgressionFields,
    ) -> Result<ProgressionRecord, ProgressionError>;

    /// Overwrite both budget columns on every matching row. Returns the
    /// number of rows touched.
    async fn update_where(
        &self,
        filter: RecordFilter,
        budgets: DailyBudgets,
    ) -> Result<u64, ProgressionError>;
}
