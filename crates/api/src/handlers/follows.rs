//! Handlers for follow edges under `/users/{id}`.

use arcade_core::error::CoreError;
use arcade_core::follow::validate_follow;
use arcade_core::types::DbId;
use arcade_db::models::follow::{Follow, FollowEntry};
use arcade_db::repositories::FollowRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::users::find_user;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users/{id}/follow
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Follow>>)> {
    validate_follow(auth.user_id, id)?;
    find_user(&state, id).await?;

    if FollowRepo::exists(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You already follow this user".into(),
        )));
    }

    // A concurrent duplicate still trips uq_follows_pair and maps to 409.
    let follow = FollowRepo::create(&state.pool, auth.user_id, id).await?;
    tracing::debug!(follower_id = auth.user_id, followed_id = id, "Follow created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: follow })))
}

/// DELETE /api/v1/users/{id}/follow
pub async fn unfollow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !FollowRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Follow",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}/following
pub async fn list_following(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FollowEntry>>>> {
    find_user(&state, id).await?;
    let entries = FollowRepo::list_following(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/users/{id}/followers
pub async fn list_followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FollowEntry>>>> {
    find_user(&state, id).await?;
    let entries = FollowRepo::list_followers(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}
