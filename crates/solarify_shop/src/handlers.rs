// --- File: crates/solarify_shop/src/handlers.rs ---
use crate::logic::{
    self, CreateOrderRequest, DeleteResponse, LowStockQuery, OrderListQuery, RestockRequest,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use solarify_common::{conflict, not_found, validation_error, SolarifyError};
use solarify_config::AppConfig;
use solarify_db::models::{
    InventoryItem, NewInventoryItem, NewOrder, Order, OrderStatus, StockChange,
    UpdateInventoryItem,
};
use solarify_db::repositories::{InventoryRepository, OrderRepository};
use solarify_db::Repositories;
use solarify_notify::NotificationDispatcher;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state for the shop handlers.
///
/// The dispatcher is held here so that order confirmation can fire stock
/// alerts without the handlers knowing about channels or preferences.
pub struct ShopState {
    pub config: Arc<AppConfig>,
    pub repos: Repositories,
    pub dispatcher: NotificationDispatcher,
}

// --- Inventory ---

/// Handler to list all inventory items.
#[axum::debug_handler]
pub async fn list_items_handler(
    State(state): State<Arc<ShopState>>,
) -> Result<Json<Vec<InventoryItem>>, SolarifyError> {
    let items = state.repos.inventory.list().await?;
    Ok(Json(items))
}

/// Handler to list items at or below a stock threshold.
#[axum::debug_handler]
pub async fn low_stock_handler(
    State(state): State<Arc<ShopState>>,
    Query(query): Query<LowStockQuery>,
) -> Result<Json<Vec<InventoryItem>>, SolarifyError> {
    let threshold = query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    if threshold < 0 {
        return Err(validation_error("threshold must not be negative"));
    }

    let items = state.repos.inventory.low_stock(threshold).await?;
    Ok(Json(items))
}

/// Handler to create an inventory item.
#[axum::debug_handler]
pub async fn create_item_handler(
    State(state): State<Arc<ShopState>>,
    Json(payload): Json<NewInventoryItem>,
) -> Result<Json<InventoryItem>, SolarifyError> {
    logic::validate_new_item(&payload)?;

    let item = state.repos.inventory.create(payload).await?;
    info!("Created inventory item {} ({})", item.id, item.sku);
    Ok(Json(item))
}

/// Handler to fetch one inventory item by id.
#[axum::debug_handler]
pub async fn get_item_handler(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
) -> Result<Json<InventoryItem>, SolarifyError> {
    let item = state
        .repos
        .inventory
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("inventory item {id} not found")))?;

    Ok(Json(item))
}

/// Handler to partially update an item's descriptive fields.
///
/// Stock levels are deliberately out of reach here; they only move through
/// orders and restocks.
#[axum::debug_handler]
pub async fn update_item_handler(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateInventoryItem>,
) -> Result<Json<InventoryItem>, SolarifyError> {
    logic::validate_item_update(&payload)?;

    let item = state
        .repos
        .inventory
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(format!("inventory item {id} not found")))?;

    Ok(Json(item))
}

/// Handler to delete an inventory item.
#[axum::debug_handler]
pub async fn delete_item_handler(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, SolarifyError> {
    if !state.repos.inventory.delete(id).await? {
        return Err(not_found(format!("inventory item {id} not found")));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Inventory item deleted.".to_string(),
    }))
}

/// Handler to receive stock for an item.
#[axum::debug_handler]
pub async fn restock_item_handler(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
    Json(payload): Json<RestockRequest>,
) -> Result<Json<StockChange>, SolarifyError> {
    logic::validate_restock(&payload)?;

    let change = state.repos.inventory.restock(id, payload.quantity).await?;
    info!(
        "Restocked item {}: {} -> {}",
        id, change.previous, change.new
    );
    Ok(Json(change))
}

// --- Orders ---

/// Handler to list orders, optionally filtered by status.
#[axum::debug_handler]
pub async fn list_orders_handler(
    State(state): State<Arc<ShopState>>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>, SolarifyError> {
    let orders = state.repos.orders.list(query.status).await?;
    Ok(Json(orders))
}

/// Handler to place an order.
///
/// The order starts out pending and reserves nothing; stock only moves on
/// confirmation. The total is computed from the item's current unit price.
#[axum::debug_handler]
pub async fn create_order_handler(
    State(state): State<Arc<ShopState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<Order>, SolarifyError> {
    logic::validate_new_order(&payload)?;

    let item = state
        .repos
        .inventory
        .find_by_id(payload.item_id)
        .await?
        .ok_or_else(|| {
            validation_error(format!(
                "order must reference an existing product, item {} does not exist",
                payload.item_id
            ))
        })?;

    let order = state
        .repos
        .orders
        .create(NewOrder {
            item_id: item.id,
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            quantity: payload.quantity,
            total_cents: payload.quantity * item.unit_price_cents,
        })
        .await?;

    info!("Created order {} for item {}", order.id, item.id);
    Ok(Json(order))
}

/// Handler to fetch one order by id.
#[axum::debug_handler]
pub async fn get_order_handler(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, SolarifyError> {
    let order = state
        .repos
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("order {id} not found")))?;

    Ok(Json(order))
}

/// Handler to confirm a pending order.
///
/// Stock is decremented transactionally; a concurrent confirmation of the
/// last units loses with a conflict and the order stays pending. Threshold
/// alerts go out after the commit and never fail the confirmation.
#[axum::debug_handler]
pub async fn confirm_order_handler(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, SolarifyError> {
    let order = state
        .repos
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("order {id} not found")))?;

    if order.status != OrderStatus::Pending {
        return Err(conflict(format!(
            "order {id} is {} and can no longer be confirmed",
            order.status.as_str()
        )));
    }

    let change = state
        .repos
        .inventory
        .decrement_stock(order.item_id, order.quantity)
        .await?;

    if !state
        .repos
        .orders
        .set_status(id, OrderStatus::Pending, OrderStatus::Confirmed)
        .await?
    {
        // Someone else moved the order while we were decrementing. Put the
        // stock back and report the conflict.
        if let Err(e) = state
            .repos
            .inventory
            .restock(order.item_id, order.quantity)
            .await
        {
            warn!(
                "Could not return stock for item {} after lost confirmation race: {}",
                order.item_id, e
            );
        }
        return Err(conflict(format!("order {id} was updated concurrently")));
    }

    info!(
        "Confirmed order {}: item {} stock {} -> {}",
        id, change.item_id, change.previous, change.new
    );

    if let Some(item) = state.repos.inventory.find_by_id(order.item_id).await? {
        state.dispatcher.notify_stock_change(&item, &change).await;
    }

    let confirmed = state
        .repos
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("order {id} not found")))?;
    Ok(Json(confirmed))
}

/// Handler to cancel an order.
///
/// Pending orders just flip their status; confirmed orders also return
/// their quantity to stock. Cancelling twice is a conflict.
#[axum::debug_handler]
pub async fn cancel_order_handler(
    State(state): State<Arc<ShopState>>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, SolarifyError> {
    let order = state
        .repos
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("order {id} not found")))?;

    let restock_needed = match order.status {
        OrderStatus::Pending => false,
        OrderStatus::Confirmed => true,
        OrderStatus::Cancelled => {
            return Err(conflict(format!("order {id} is already cancelled")));
        }
    };

    if !state
        .repos
        .orders
        .set_status(id, order.status, OrderStatus::Cancelled)
        .await?
    {
        return Err(conflict(format!("order {id} was updated concurrently")));
    }

    if restock_needed {
        let change = state
            .repos
            .inventory
            .restock(order.item_id, order.quantity)
            .await?;
        info!(
            "Cancelled order {}: returned {} units to item {} ({} -> {})",
            id, order.quantity, order.item_id, change.previous, change.new
        );
    } else {
        info!("Cancelled order {}", id);
    }

    let cancelled = state
        .repos
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("order {id} not found")))?;
    Ok(Json(cancelled))
}
