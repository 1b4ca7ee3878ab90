//! Follow-graph routes, merged into `/users`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::follows;
use crate::state::AppState;

/// ```text
/// POST   /{id}/follow     -> follow_user
/// DELETE /{id}/follow     -> unfollow_user
/// GET    /{id}/following  -> list_following
/// GET    /{id}/followers  -> list_followers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/follow",
            post(follows::follow_user).delete(follows::unfollow_user),
        )
        .route("/{id}/following", get(follows::list_following))
        .route("/{id}/followers", get(follows::list_followers))
}
