//! User entity model and DTOs.

use arcade_core::progression::ProgressionRecord;
use arcade_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_operator: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub level: i32,
    pub experience_points: i32,
    pub experience_for_day: i32,
    pub buddy_level: i32,
    pub buddy_experience_points: i32,
    pub buddy_experience_for_day: i32,
    pub progress_version: i64,
    pub current_rps_streak: i32,
    pub highest_rps_streak: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public user representation (no credentials, no email).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub is_operator: bool,
    pub level: i32,
    pub buddy_level: i32,
    pub highest_rps_streak: i32,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_operator: user.is_operator,
            level: user.level,
            buddy_level: user.buddy_level,
            highest_rps_streak: user.highest_rps_streak,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for ProgressionRecord {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            level: user.level,
            experience_points: user.experience_points,
            experience_for_day: user.experience_for_day,
            buddy_level: user.buddy_level,
            buddy_experience_points: user.buddy_experience_points,
            buddy_experience_for_day: user.buddy_experience_for_day,
            progress_version: user.progress_version,
        }
    }
}

/// DTO for creating a new user. Progression columns take their defaults.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
