//! Progression routes, merged into `/users`.

use axum::routing::get;
use axum::Router;

use crate::handlers::progression;
use crate::state::AppState;

/// ```text
/// GET /{id}/progression  -> get_progression
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/progression", get(progression::get_progression))
}
