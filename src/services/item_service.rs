use std::sync::Arc;

use crate::api::payload::{ItemPayload, ItemUpdate};
use crate::database::models::{Item, NewItem};
use crate::database::repository::ItemRepository;
use crate::error::ApiError;
use crate::middleware::RequestContext;
use crate::validation::FieldError;

pub const INVALID_COST_MESSAGE: &str = "Item cost must be a valid number greater than zero";

#[derive(Clone)]
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }

    /// Turn the transport payload into a storable item, parsing the text cost.
    ///
    /// Expects a payload that already passed validation; a packed item without
    /// content is logged, not rejected.
    #[tracing::instrument(skip_all, fields(item_name = ?payload.item_name), err)]
    pub fn convert_to_entity(&self, payload: ItemPayload) -> Result<NewItem, ApiError> {
        let name = payload.item_name.clone().unwrap_or_default();

        let cost = payload
            .item_cost
            .as_deref()
            .and_then(|c| c.parse::<i32>().ok())
            .ok_or_else(|| {
                tracing::error!("Invalid item cost format for item: {}", name);
                ApiError::illegal_argument(INVALID_COST_MESSAGE)
            })?;

        if payload.is_missing_content() {
            tracing::warn!("Item pack is Y but content missing for item: {}", name);
        }

        Ok(NewItem {
            item_name: required("itemName", payload.item_name)?,
            item_cost: cost,
            item_quantity: required("itemQuantity", payload.item_quantity)?,
            item_pack: required("itemPack", payload.item_pack)?,
            item_content: payload.item_content,
            item_dimensions: required("itemDimensions", payload.item_dimensions)?,
            item_origin_location: required("itemOriginLocation", payload.item_origin_location)?,
            item_ship: required("itemShip", payload.item_ship)?,
            item_company: required("itemCompany", payload.item_company)?,
            item_manufacturing_date_time: required(
                "itemManufacturingDateTime",
                payload.item_manufacturing_date_time,
            )?,
            item_expiry_date: required("itemExpiryDate", payload.item_expiry_date)?,
        })
    }

    #[tracing::instrument(skip_all, fields(item_name = %item.item_name), err)]
    pub async fn save_item(&self, ctx: &RequestContext, item: NewItem) -> Result<Item, ApiError> {
        let saved = self.items.insert(item).await?;
        tracing::info!("User '{}' created item: {} (ID: {})", ctx.actor(), saved.item_name, saved.id);
        Ok(saved)
    }

    /// Apply every present field; content is always overwritten, even with null.
    #[tracing::instrument(skip(self, ctx, update), err)]
    pub async fn update_item(&self, ctx: &RequestContext, id: i64, update: ItemUpdate) -> Result<Item, ApiError> {
        let mut existing = self.items.find_by_id(id).await?.ok_or_else(|| {
            tracing::error!("Failed to update item: {} -> Item not found", id);
            ApiError::runtime("Item not found")
        })?;

        if update.is_missing_content() {
            tracing::warn!("Item pack is Y but content missing for item ID: {}", id);
        }

        apply_update(&mut existing, update);

        let saved = self.items.save(existing).await?;
        tracing::info!("User '{}' updated item: {} (ID: {})", ctx.actor(), saved.item_name, id);
        Ok(saved)
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn get_all_items(&self) -> Result<Vec<Item>, ApiError> {
        let items = self.items.find_all().await?;
        tracing::debug!("Found {} items", items.len());
        Ok(items)
    }

    /// Missing ids are `None`, not an error
    #[tracing::instrument(skip(self), ret, err)]
    pub async fn get_item_by_id(&self, id: i64) -> Result<Option<Item>, ApiError> {
        Ok(self.items.find_by_id(id).await?)
    }

    #[tracing::instrument(skip(self, ctx), err)]
    pub async fn delete_item(&self, ctx: &RequestContext, id: i64) -> Result<(), ApiError> {
        if !self.items.exists_by_id(id).await? {
            tracing::warn!("Tried to delete non-existent item: {}", id);
            return Ok(());
        }

        self.items.delete_by_id(id).await?;
        tracing::info!("User '{}' deleted item with ID: {}", ctx.actor(), id);
        Ok(())
    }
}

fn apply_update(existing: &mut Item, update: ItemUpdate) {
    if let Some(v) = update.item_name {
        existing.item_name = v;
    }
    if let Some(v) = update.item_cost {
        existing.item_cost = v;
    }
    if let Some(v) = update.item_quantity {
        existing.item_quantity = v;
    }
    if let Some(v) = update.item_pack {
        existing.item_pack = v;
    }
    existing.item_content = update.item_content;
    if let Some(v) = update.item_dimensions {
        existing.item_dimensions = v;
    }
    if let Some(v) = update.item_origin_location {
        existing.item_origin_location = v;
    }
    if let Some(v) = update.item_ship {
        existing.item_ship = v;
    }
    if let Some(v) = update.item_company {
        existing.item_company = v;
    }
    if let Some(v) = update.item_manufacturing_date_time {
        existing.item_manufacturing_date_time = v;
    }
    if let Some(v) = update.item_expiry_date {
        existing.item_expiry_date = v;
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::validation_error(vec![FieldError::new(field, format!("{} is required", field))]))
}
