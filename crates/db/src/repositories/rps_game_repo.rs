//! Repository for the `rps_games` table and the streak columns on `users`.

use arcade_core::rps::Streak;
use arcade_core::types::DbId;
use sqlx::PgPool;

use crate::models::rps_game::{CreateRpsGame, RpsGame};

const COLUMNS: &str = "id, user_id, player_choice, house_choice, outcome, \
                        streak_after, xp_awarded, played_at";

/// Maximum number of rounds returned by [`RpsGameRepo::list_recent`].
pub const MAX_HISTORY: i64 = 100;

/// Provides game history and streak bookkeeping.
pub struct RpsGameRepo;

impl RpsGameRepo {
    /// Record a finished round and advance the player's streak.
    ///
    /// The streak row is locked with `FOR UPDATE` so concurrent rounds for the
    /// same player apply one after another. Returns `None` if the user no
    /// longer exists.
    pub async fn record_round(
        pool: &PgPool,
        input: &CreateRpsGame,
    ) -> Result<Option<(RpsGame, Streak)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(i32, i32)> = sqlx::query_as(
            "SELECT current_rps_streak, highest_rps_streak FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(input.user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((current, highest)) = current else {
            return Ok(None);
        };
        let streak = Streak { current, highest }.after(input.outcome);

        sqlx::query(
            "UPDATE users SET current_rps_streak = $2, highest_rps_streak = $3 WHERE id = $1",
        )
        .bind(input.user_id)
        .bind(streak.current)
        .bind(streak.highest)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO rps_games
                (user_id, player_choice, house_choice, outcome, streak_after, xp_awarded)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let game = sqlx::query_as::<_, RpsGame>(&query)
            .bind(input.user_id)
            .bind(input.player_choice.as_str())
            .bind(input.house_choice.as_str())
            .bind(input.outcome.as_str())
            .bind(streak.current)
            .bind(input.xp_awarded)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((game, streak)))
    }

    /// Most recent rounds for a user, newest first. `limit` is clamped to
    /// `1..=MAX_HISTORY`.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<RpsGame>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rps_games
             WHERE user_id = $1
             ORDER BY played_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, RpsGame>(&query)
            .bind(user_id)
            .bind(limit.clamp(1, MAX_HISTORY))
            .fetch_all(pool)
            .await
    }
}
