//! Route definitions for the `/games` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// POST /rps          -> play_rps
/// GET  /rps/history  -> rps_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rps", post(games::play_rps))
        .route("/rps/history", get(games::rps_history))
}
