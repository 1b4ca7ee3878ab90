//! Operator-only access.

use arcade_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the operator flag. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn operator_only(RequireOperator(user): RequireOperator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireOperator(pub AuthUser);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_operator {
            return Err(AppError::Core(CoreError::Forbidden(
                "Operator access required".into(),
            )));
        }
        Ok(RequireOperator(user))
    }
}
