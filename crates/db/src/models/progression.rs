//! Progression columns of the `users` table.

use arcade_core::progression::ProgressionRecord;
use arcade_core::types::DbId;
use sqlx::FromRow;

/// The subset of a user row the progression engine reads and writes.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ProgressionRow {
    pub id: DbId,
    pub level: i32,
    pub experience_points: i32,
    pub experience_for_day: i32,
    pub buddy_level: i32,
    pub buddy_experience_points: i32,
    pub buddy_experience_for_day: i32,
    pub progress_version: i64,
}

impl From<ProgressionRow> for ProgressionRecord {
    fn from(row: ProgressionRow) -> Self {
        Self {
            user_id: row.id,
            level: row.level,
            experience_points: row.experience_points,
            experience_for_day: row.experience_for_day,
            buddy_level: row.buddy_level,
            buddy_experience_points: row.buddy_experience_points,
            buddy_experience_for_day: row.buddy_experience_for_day,
            progress_version: row.progress_version,
        }
    }
}
