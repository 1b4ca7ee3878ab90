//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /             -> list_users
/// POST /             -> create_user
/// GET  /me           -> get_me
/// POST /me/delete    -> delete_me
/// POST /search       -> search_user
/// GET  /{id}         -> get_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/me", get(users::get_me))
        .route("/me/delete", post(users::delete_me))
        .route("/search", post(users::search_user))
        .route("/{id}", get(users::get_user))
}
