// File: crates/solarify_shop/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    CreateOrderRequest, DeleteResponse, LowStockQuery, OrderListQuery, RestockRequest,
};
use solarify_db::models::{
    InventoryItem, NewInventoryItem, Order, StockChange, UpdateInventoryItem,
};

#[utoipa::path(
    get,
    path = "/shop/inventory",
    responses((status = 200, description = "All inventory items", body = Vec<InventoryItem>))
)]
fn doc_list_items_handler() {}

#[utoipa::path(
    get,
    path = "/shop/inventory/low-stock",
    params(LowStockQuery),
    responses(
        (status = 200, description = "Items at or below the threshold, lowest first", body = Vec<InventoryItem>),
        (status = 400, description = "Negative threshold")
    )
)]
fn doc_low_stock_handler() {}

#[utoipa::path(
    post,
    path = "/shop/inventory",
    request_body = NewInventoryItem,
    responses(
        (status = 200, description = "Item created", body = InventoryItem),
        (status = 400, description = "Invalid item payload"),
        (status = 409, description = "Sku already in use")
    )
)]
fn doc_create_item_handler() {}

#[utoipa::path(
    get,
    path = "/shop/inventory/{id}",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = InventoryItem),
        (status = 404, description = "Item not found")
    )
)]
fn doc_get_item_handler() {}

#[utoipa::path(
    patch,
    path = "/shop/inventory/{id}",
    params(("id" = i64, Path, description = "Item id")),
    request_body = UpdateInventoryItem,
    responses(
        (status = 200, description = "Updated item", body = InventoryItem),
        (status = 400, description = "Invalid update payload"),
        (status = 404, description = "Item not found")
    )
)]
fn doc_update_item_handler() {}

#[utoipa::path(
    delete,
    path = "/shop/inventory/{id}",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Deletion result", body = DeleteResponse),
        (status = 404, description = "Item not found")
    )
)]
fn doc_delete_item_handler() {}

#[utoipa::path(
    post,
    path = "/shop/inventory/{id}/restock",
    params(("id" = i64, Path, description = "Item id")),
    request_body = RestockRequest,
    responses(
        (status = 200, description = "Stock levels before and after", body = StockChange),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Item not found")
    )
)]
fn doc_restock_item_handler() {}

#[utoipa::path(
    get,
    path = "/shop/orders",
    params(OrderListQuery),
    responses((status = 200, description = "Orders, newest first", body = Vec<Order>))
)]
fn doc_list_orders_handler() {}

#[utoipa::path(
    post,
    path = "/shop/orders",
    request_body(content = CreateOrderRequest, example = json!({
        "item_id": 1,
        "customer_name": "Jamie Example",
        "customer_email": "jamie@example.com",
        "quantity": 2
    })),
    responses(
        (status = 200, description = "Pending order created", body = Order),
        (status = 400, description = "Invalid payload or unknown item")
    )
)]
fn doc_create_order_handler() {}

#[utoipa::path(
    get,
    path = "/shop/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "Order not found")
    )
)]
fn doc_get_order_handler() {}

#[utoipa::path(
    post,
    path = "/shop/orders/{id}/confirm",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Confirmed order", body = Order),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Not pending, or insufficient stock")
    )
)]
fn doc_confirm_order_handler() {}

#[utoipa::path(
    post,
    path = "/shop/orders/{id}/cancel",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Cancelled order", body = Order),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Already cancelled")
    )
)]
fn doc_cancel_order_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_items_handler,
        doc_low_stock_handler,
        doc_create_item_handler,
        doc_get_item_handler,
        doc_update_item_handler,
        doc_delete_item_handler,
        doc_restock_item_handler,
        doc_list_orders_handler,
        doc_create_order_handler,
        doc_get_order_handler,
        doc_confirm_order_handler,
        doc_cancel_order_handler
    ),
    components(
        schemas(
            InventoryItem,
            NewInventoryItem,
            UpdateInventoryItem,
            StockChange,
            Order,
            CreateOrderRequest,
            RestockRequest,
            DeleteResponse
        )
    ),
    tags(
        (name = "shop", description = "Inventory and order API")
    ),
    servers(
        (url = "/api", description = "Solarify API server")
    )
)]
pub struct ShopApiDoc;
