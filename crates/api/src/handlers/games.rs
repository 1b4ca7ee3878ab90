//! Rock-Paper-Scissors against the house.

use arcade_core::error::CoreError;
use arcade_core::progression::AwardOutcome;
use arcade_core::rps::{play, RpsChoice};
use arcade_core::types::DbId;
use arcade_db::models::rps_game::{CreateRpsGame, RpsGame};
use arcade_db::repositories::RpsGameRepo;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::progression::award_with_retry;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 20;

/// Request body for `POST /games/rps`.
#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub choice: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// A finished round.
#[derive(Debug, Serialize)]
pub struct RoundResponse {
    pub game: RpsGame,
    pub current_streak: i32,
    pub highest_streak: i32,
    /// `None` when the round earned no XP.
    pub award: Option<AwardOutcome>,
}

/// POST /api/v1/games/rps
///
/// The XP award runs first and is retried on version conflicts. The round is
/// then stored with the XP the engine actually applied.
pub async fn play_rps(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PlayRequest>,
) -> AppResult<Json<DataResponse<RoundResponse>>> {
    let player_choice: RpsChoice = input.choice.trim().parse()?;
    let house_choice = RpsChoice::random(&mut rand::rng());
    let outcome = play(player_choice, house_choice);

    let award = match outcome.xp_reward() {
        0 => None,
        xp => Some(award_with_retry(&state.engine, auth.user_id, xp).await?),
    };

    let (game, streak) = RpsGameRepo::record_round(
        &state.pool,
        &CreateRpsGame {
            user_id: auth.user_id,
            player_choice,
            house_choice,
            outcome,
            xp_awarded: award.as_ref().map_or(0, |a| a.primary.applied),
        },
    )
    .await?
    .ok_or_else(|| user_not_found(auth.user_id))?;

    tracing::debug!(
        user_id = auth.user_id,
        player = %player_choice,
        house = %house_choice,
        outcome = outcome.as_str(),
        streak = streak.current,
        "RPS round played"
    );

    Ok(Json(DataResponse {
        data: RoundResponse {
            game,
            current_streak: streak.current,
            highest_streak: streak.highest,
            award,
        },
    }))
}

/// GET /api/v1/games/rps/history
pub async fn rps_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<DataResponse<Vec<RpsGame>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if limit < 1 {
        return Err(AppError::BadRequest("limit must be at least 1".into()));
    }
    let games = RpsGameRepo::list_recent(&state.pool, auth.user_id, limit).await?;
    Ok(Json(DataResponse { data: games }))
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}
