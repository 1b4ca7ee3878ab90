//! Operator endpoints.

use arcade_core::progression::SweepReport;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/progression/reset-daily-caps
///
/// Run the daily cap sweep now. Waits for a scheduled sweep in progress.
pub async fn reset_daily_caps(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
) -> AppResult<Json<DataResponse<SweepReport>>> {
    tracing::info!(operator_id = operator.user_id, "Manual daily cap reset requested");
    let report = state.sweeper.reset_all_daily_caps().await?;
    Ok(Json(DataResponse { data: report }))
}
