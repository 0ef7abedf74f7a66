// --- File: crates/solarify_shop/src/logic.rs ---
use serde::{Deserialize, Serialize};
use solarify_common::{validation_error, SolarifyError};
use solarify_db::models::{NewInventoryItem, OrderStatus, UpdateInventoryItem};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Default cutoff for the low-stock listing when the caller gives none.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 20;

// --- Data Structures ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct LowStockQuery {
    /// Items with quantity at or below this value are returned
    pub threshold: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct OrderListQuery {
    /// Restrict the listing to one order status
    pub status: Option<OrderStatus>,
}

/// Payload for placing an order. The total is never client-supplied; it
/// is computed from the item's current unit price.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateOrderRequest {
    pub item_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i64,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RestockRequest {
    pub quantity: i64,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

// --- Validation ---

pub fn validate_new_item(item: &NewInventoryItem) -> Result<(), SolarifyError> {
    if item.sku.trim().is_empty() {
        return Err(validation_error("item sku must not be empty"));
    }
    if item.name.trim().is_empty() {
        return Err(validation_error("item name must not be empty"));
    }
    if item.quantity < 0 {
        return Err(validation_error("item quantity must not be negative"));
    }
    if item.unit_price_cents < 0 {
        return Err(validation_error("item unit price must not be negative"));
    }
    Ok(())
}

pub fn validate_item_update(update: &UpdateInventoryItem) -> Result<(), SolarifyError> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(validation_error("item name must not be empty"));
        }
    }
    if let Some(price) = update.unit_price_cents {
        if price < 0 {
            return Err(validation_error("item unit price must not be negative"));
        }
    }
    Ok(())
}

pub fn validate_new_order(order: &CreateOrderRequest) -> Result<(), SolarifyError> {
    if order.customer_name.trim().is_empty() {
        return Err(validation_error("customer name must not be empty"));
    }
    if !order.customer_email.contains('@') {
        return Err(validation_error("customer email is not valid"));
    }
    if order.quantity < 1 {
        return Err(validation_error("order quantity must be at least 1"));
    }
    Ok(())
}

pub fn validate_restock(request: &RestockRequest) -> Result<(), SolarifyError> {
    if request.quantity < 1 {
        return Err(validation_error("restock quantity must be at least 1"));
    }
    Ok(())
}
