// handlers/public/users.rs - POST /users handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::api::payload::SignupRequest;
use crate::database::models::AppUser;
use crate::middleware::{ApiResponse, ApiResult, RequestContext};
use crate::state::AppState;
use crate::validation::ensure_valid;

/// POST /users - Sign up a new account.
///
/// Open to anonymous callers. When Basic credentials are sent the caller is
/// treated as the creator, which decides whether an admin role is allowed.
/// Responds 200 with the stored record, password included.
pub async fn user_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<AppUser> {
    let Json(request) = payload?;
    ensure_valid(&request)?;

    let user = state.user_service.create_user(&ctx, request).await?;
    Ok(ApiResponse::success(user))
}
