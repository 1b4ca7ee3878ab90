//! PostgreSQL implementation of [`ProgressionStore`].

use arcade_core::progression::{
    DailyBudgets, ProgressionError, ProgressionFields, ProgressionRecord, ProgressionStore,
    RecordFilter,
};
use arcade_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::progression::ProgressionRow;

const COLUMNS: &str = "id, level, experience_points, experience_for_day, \
                        buddy_level, buddy_experience_points, buddy_experience_for_day, \
                        progress_version";

/// Progression store over the `users` table.
///
/// Award writes are a single `UPDATE ... WHERE progress_version = $2`, so a
/// concurrent writer makes the statement match zero rows instead of
/// overwriting it.
#[derive(Debug, Clone)]
pub struct PgProgressionStore {
    pool: PgPool,
}

impl PgProgressionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, user_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[async_trait]
impl ProgressionStore for PgProgressionStore {
    async fn load(&self, user_id: DbId) -> Result<Option<ProgressionRecord>, ProgressionError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, ProgressionRow>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(ProgressionError::storage)?;
        Ok(row.map(ProgressionRecord::from))
    }

    async fn update_fields(
        &self,
        user_id: DbId,
        expected_version: i64,
        fields: &ProgressionFields,
    ) -> Result<ProgressionRecord, ProgressionError> {
        let query = format!(
            "UPDATE users SET
                level = $3,
                experience_points = $4,
                experience_for_day = $5,
                buddy_level = $6,
                buddy_experience_points = $7,
                buddy_experience_for_day = $8,
                progress_version = progress_version + 1
             WHERE id = $1 AND progress_version = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProgressionRow>(&query)
            .bind(user_id)
            .bind(expected_version)
            .bind(fields.level)
            .bind(fields.experience_points)
            .bind(fields.experience_for_day)
            .bind(fields.buddy_level)
            .bind(fields.buddy_experience_points)
            .bind(fields.buddy_experience_for_day)
            .fetch_optional(&self.pool)
            .await
            .map_err(ProgressionError::storage)?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                let exists = self
                    .user_exists(user_id)
                    .await
                    .map_err(ProgressionError::storage)?;
                if exists {
                    tracing::debug!(user_id, expected_version, "Progression version moved on");
                    Err(ProgressionError::Conflict { user_id })
                } else {
                    Err(ProgressionError::NotFound { user_id })
                }
            }
        }
    }

    async fn update_where(
        &self,
        filter: RecordFilter,
        budgets: DailyBudgets,
    ) -> Result<u64, ProgressionError> {
        let result = match filter {
            RecordFilter::All => {
                sqlx::query(
                    "UPDATE users SET
                        experience_for_day = $1,
                        buddy_experience_for_day = $2,
                        progress_version = progress_version + 1",
                )
                .bind(budgets.experience_for_day)
                .bind(budgets.buddy_experience_for_day)
                .execute(&self.pool)
                .await
            }
            RecordFilter::BuddyLevelAtLeast(min) => {
                sqlx::query(
                    "UPDATE users SET
                        experience_for_day = $1,
                        buddy_experience_for_day = $2,
                        progress_version = progress_version + 1
                     WHERE buddy_level >= $3",
                )
                .bind(budgets.experience_for_day)
                .bind(budgets.buddy_experience_for_day)
                .bind(min)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(ProgressionError::storage)?;

        Ok(result.rows_affected())
    }
}
