//! Handlers for the `/users` resource.

use arcade_core::error::CoreError;
use arcade_core::progression::ProgressionRecord;
use arcade_core::types::DbId;
use arcade_core::user::{
    normalize_email, validate_email, validate_password_strength, validate_username,
};
use arcade_db::models::user::{CreateUser, User, UserResponse};
use arcade_db::repositories::{FollowRepo, UserRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub username: String,
}

/// Request body for `POST /users/me/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub email: String,
    pub password: String,
}

/// A user's profile as seen by the requesting user.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub progression: ProgressionRecord,
    pub following_count: i64,
    pub follower_count: i64,
    /// Whether the viewer follows this user.
    pub is_following: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Register a new account. Returns 201 with the public user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let username = input.username.trim();
    let email = normalize_email(&input.email);
    validate_username(username)?;
    validate_email(&email)?;
    validate_password_strength(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = find_user(&state, auth.user_id).await?;
    let profile = build_profile(&state, auth.user_id, user).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = find_user(&state, id).await?;
    let profile = build_profile(&state, auth.user_id, user).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/users/search
///
/// Exact username lookup.
pub async fn search_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SearchRequest>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let username = input.username.trim();
    let user = UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user named '{username}'")))?;
    let profile = build_profile(&state, auth.user_id, user).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/users/me/delete
///
/// Delete the caller's account after re-checking email and password. Follow
/// edges in both directions are removed by cascade. Returns 204.
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DeleteAccountRequest>,
) -> AppResult<StatusCode> {
    let user = find_user(&state, auth.user_id).await?;

    if user.email != normalize_email(&input.email) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Email does not match the signed-in account".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    UserRepo::delete(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

async fn build_profile(state: &AppState, viewer_id: DbId, user: User) -> AppResult<ProfileResponse> {
    let (following_count, follower_count) = FollowRepo::counts(&state.pool, user.id).await?;
    let is_following = viewer_id != user.id
        && FollowRepo::exists(&state.pool, viewer_id, user.id).await?;

    Ok(ProfileResponse {
        user: UserResponse::from(&user),
        progression: ProgressionRecord::from(&user),
        following_count,
        follower_count,
        is_following,
    })
}
