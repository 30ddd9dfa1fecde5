// handlers/elevated/users.rs - /users management (ROLE_ADMIN)

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension,
};

use crate::database::models::AppUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RequestContext};
use crate::state::AppState;

/// GET /users
pub async fn user_list(State(state): State<AppState>) -> ApiResult<Vec<AppUser>> {
    tracing::info!("Authenticated user accessing /users");
    Ok(ApiResponse::success(state.user_service.get_all_users().await?))
}

/// GET /users/:id
///
/// A missing id is a 404 with the not-found envelope. Item lookups answer
/// a missing id with 200 and a `null` body instead.
pub async fn user_get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<AppUser> {
    let Path(id) = id?;
    Ok(ApiResponse::success(state.user_service.get_user_by_id(id).await?))
}

/// DELETE /users/:id - 204; refuses immutable accounts
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.user_service.delete_user(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
