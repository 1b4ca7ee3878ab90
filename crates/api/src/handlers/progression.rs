//! Progression read endpoint and the award helper used by game handlers.

use arcade_core::progression::{
    buddy_xp_to_level_up, daily_budgets_for, reward_multiplier, xp_to_level_up, AwardOutcome,
    DailyBudgets, ProgressionEngine, ProgressionError, ProgressionRecord,
};
use arcade_core::types::DbId;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Attempts per award before a version conflict is surfaced as 409.
pub const MAX_AWARD_ATTEMPTS: u32 = 3;

/// Progression record plus values derived from it.
#[derive(Debug, Serialize)]
pub struct ProgressionView {
    #[serde(flatten)]
    pub record: ProgressionRecord,
    pub xp_to_level_up: i64,
    pub buddy_xp_to_level_up: i64,
    pub reward_multiplier: i64,
    /// Budgets the next daily reset will restore for this buddy level.
    pub daily_baseline: DailyBudgets,
}

impl From<ProgressionRecord> for ProgressionView {
    fn from(record: ProgressionRecord) -> Self {
        Self {
            xp_to_level_up: xp_to_level_up(record.level),
            buddy_xp_to_level_up: buddy_xp_to_level_up(record.buddy_level),
            reward_multiplier: reward_multiplier(record.buddy_level),
            daily_baseline: daily_budgets_for(record.buddy_level),
            record,
        }
    }
}

/// GET /api/v1/users/{id}/progression
pub async fn get_progression(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProgressionView>>> {
    let record = state.engine.progression(id).await?;
    Ok(Json(DataResponse {
        data: ProgressionView::from(record),
    }))
}

/// Award XP, retrying on version conflicts.
///
/// Each attempt reloads the record, so a retry never double-applies.
pub(crate) async fn award_with_retry(
    engine: &ProgressionEngine,
    user_id: DbId,
    xp: i32,
) -> Result<AwardOutcome, ProgressionError> {
    let mut attempt = 1;
    loop {
        match engine.award_xp(user_id, xp).await {
            Err(ProgressionError::Conflict { .. }) if attempt < MAX_AWARD_ATTEMPTS => {
                tracing::debug!(user_id, attempt, "Award conflicted, retrying");
                attempt += 1;
            }
            Err(e @ ProgressionError::Conflict { .. }) => {
                tracing::warn!(user_id, attempts = attempt, "Award abandoned after conflicts");
                return Err(e);
            }
            other => return other,
        }
    }
}
