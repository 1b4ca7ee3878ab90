pub mod admin;
pub mod auth;
pub mod follows;
pub mod games;
pub mod health;
pub mod progression;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
///
/// /users                                        list, register (public)
/// /users/me                                     own profile
/// /users/me/delete                              delete own account (POST)
/// /users/search                                 find by username (POST)
/// /users/{id}                                   profile
/// /users/{id}/progression                       progression snapshot
/// /users/{id}/follow                            follow (POST), unfollow (DELETE)
/// /users/{id}/following                         who they follow
/// /users/{id}/followers                         who follows them
///
/// /games/rps                                    play a round (POST)
/// /games/rps/history                            own recent rounds
///
/// /admin/progression/reset-daily-caps           daily cap sweep (operator only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest(
            "/users",
            users::router()
                .merge(progression::router())
                .merge(follows::router()),
        )
        .nest("/games", games::router())
        .nest("/admin", admin::router())
}
