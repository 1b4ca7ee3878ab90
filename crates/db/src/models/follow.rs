//! Follow edge model.

use arcade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `follows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Follow {
    pub id: DbId,
    pub follower_id: DbId,
    pub followed_id: DbId,
    pub created_at: Timestamp,
}

/// One entry in a following/followers listing, joined with the other user's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FollowEntry {
    pub user_id: DbId,
    pub username: String,
    pub followed_at: Timestamp,
}
