//! Rock-Paper-Scissors round model.

use arcade_core::rps::{RpsChoice, RpsOutcome};
use arcade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `rps_games` table.
///
/// Choices and outcome are stored as lowercase text matching
/// [`RpsChoice::as_str`] and [`RpsOutcome::as_str`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RpsGame {
    pub id: DbId,
    pub user_id: DbId,
    pub player_choice: String,
    pub house_choice: String,
    pub outcome: String,
    pub streak_after: i32,
    pub xp_awarded: i32,
    pub played_at: Timestamp,
}

/// DTO for recording a finished round.
#[derive(Debug, Clone, Copy)]
pub struct CreateRpsGame {
    pub user_id: DbId,
    pub player_choice: RpsChoice,
    pub house_choice: RpsChoice,
    pub outcome: RpsOutcome,
    pub xp_awarded: i32,
}
