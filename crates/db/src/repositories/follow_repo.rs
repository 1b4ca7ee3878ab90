//! Repository for the `follows` table.

use arcade_core::types::DbId;
use sqlx::PgPool;

use crate::models::follow::{Follow, FollowEntry};

const COLUMNS: &str = "id, follower_id, followed_id, created_at";

/// Provides follow-graph queries.
pub struct FollowRepo;

impl FollowRepo {
    /// Insert a follow edge. A duplicate violates `uq_follows_pair`.
    pub async fn create(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<Follow, sqlx::Error> {
        let query = format!(
            "INSERT INTO follows (follower_id, followed_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Follow>(&query)
            .bind(follower_id)
            .bind(followed_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a follow edge. Returns `true` if it existed.
    pub async fn delete(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
            .bind(follower_id)
            .bind(followed_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(
        pool: &PgPool,
        follower_id: DbId,
        followed_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Users that `user_id` follows, most recent first.
    pub async fn list_following(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FollowEntry>, sqlx::Error> {
        sqlx::query_as::<_, FollowEntry>(
            "SELECT u.id AS user_id, u.username, f.created_at AS followed_at
             FROM follows f
             JOIN users u ON u.id = f.followed_id
             WHERE f.follower_id = $1
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Users following `user_id`, most recent first.
    pub async fn list_followers(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FollowEntry>, sqlx::Error> {
        sqlx::query_as::<_, FollowEntry>(
            "SELECT u.id AS user_id, u.username, f.created_at AS followed_at
             FROM follows f
             JOIN users u ON u.id = f.follower_id
             WHERE f.followed_id = $1
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// `(following, followers)` counts for a user.
    pub async fn counts(pool: &PgPool, user_id: DbId) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1),
                (SELECT COUNT(*) FROM follows WHERE followed_id = $1)",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
