// handlers/protected/items.rs - /items handlers (ROLE_USER or ROLE_ADMIN)

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};

use crate::api::payload::{ItemPayload, ItemUpdate};
use crate::database::models::Item;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RequestContext};
use crate::state::AppState;
use crate::validation::ensure_valid;

/// POST /items - Create an item from the transport payload; 201
pub async fn item_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> ApiResult<Item> {
    let Json(payload) = payload?;
    ensure_valid(&payload)?;

    tracing::info!(
        "Received POST request to create item: {}",
        payload.item_name.as_deref().unwrap_or_default()
    );
    let item = state.item_service.convert_to_entity(payload)?;
    let saved = state.item_service.save_item(&ctx, item).await?;
    Ok(ApiResponse::created(saved))
}

/// PUT /items/:id - Partial update; responds 201, not 200
pub async fn item_update(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemUpdate>, JsonRejection>,
) -> ApiResult<Item> {
    let Path(id) = id?;
    let Json(update) = payload?;
    ensure_valid(&update)?;

    let updated = state.item_service.update_item(&ctx, id, update).await?;
    Ok(ApiResponse::created(updated))
}

/// GET /items
pub async fn item_list(State(state): State<AppState>) -> ApiResult<Vec<Item>> {
    Ok(ApiResponse::success(state.item_service.get_all_items().await?))
}

/// GET /items/:id - `null` body when the id does not exist
pub async fn item_get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Option<Item>> {
    let Path(id) = id?;
    Ok(ApiResponse::success(state.item_service.get_item_by_id(id).await?))
}

/// DELETE /items/:id - 202 with an empty body, whether or not the item existed
pub async fn item_delete(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.item_service.delete_item(&ctx, id).await?;
    Ok(StatusCode::ACCEPTED)
}
