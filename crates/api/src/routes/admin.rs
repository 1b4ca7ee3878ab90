//! Route definitions for the `/admin` resource (operator only).

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /progression/reset-daily-caps  -> reset_daily_caps
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/progression/reset-daily-caps",
        post(admin::reset_daily_caps),
    )
}
