//! Order lifecycle tests against an in-memory database.
//!
//! These drive the real handlers end to end: place, confirm and cancel
//! orders, and check the stock and alert side effects.

use axum::extract::{Path, Query, State};
use axum::Json;
use solarify_common::SolarifyError;
use solarify_config::{AppConfig, DatabaseConfig, ServerConfig};
use solarify_db::models::{
    NewInventoryItem, NewUser, NotificationPreference, Order, OrderStatus, UserRole,
};
use solarify_db::repositories::{InventoryRepository, OrderRepository, UserRepository};
use solarify_db::{DbClient, Repositories};
use solarify_notify::{AlertStore, NotificationDispatcher};
use solarify_shop::handlers::{
    cancel_order_handler, confirm_order_handler, create_item_handler, create_order_handler,
    low_stock_handler,
};
use solarify_shop::logic::{CreateOrderRequest, LowStockQuery};
use solarify_shop::ShopState;
use std::sync::Arc;

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        },
        use_gcal: false,
        use_smtp: false,
        gcal: None,
        smtp: None,
        session: None,
    })
}

async fn setup() -> (Arc<ShopState>, Arc<AlertStore>) {
    let db_client = DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory db");
    let repos = Repositories::new(db_client);
    repos.init_schema().await.expect("schema");

    let config = test_config();
    let store = Arc::new(AlertStore::default());
    let dispatcher = NotificationDispatcher::new(&config, repos.clone(), store.clone());

    let state = Arc::new(ShopState {
        config,
        repos,
        dispatcher,
    });
    (state, store)
}

async fn seed_item(state: &Arc<ShopState>, sku: &str, quantity: i64, price: i64) -> i64 {
    let Json(item) = create_item_handler(
        State(state.clone()),
        Json(NewInventoryItem {
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            description: None,
            category: None,
            quantity,
            unit_price_cents: price,
        }),
    )
    .await
    .expect("item created");
    item.id
}

async fn seed_in_app_user(state: &Arc<ShopState>) -> i64 {
    let user = state
        .repos
        .users
        .create(NewUser {
            username: "ops".to_string(),
            email: "ops@solarify.example".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Staff,
            notification_preference: NotificationPreference::InApp,
        })
        .await
        .expect("user created");
    user.id
}

async fn place_order(state: &Arc<ShopState>, item_id: i64, quantity: i64) -> Order {
    let Json(order) = create_order_handler(
        State(state.clone()),
        Json(CreateOrderRequest {
            item_id,
            customer_name: "Jamie Example".to_string(),
            customer_email: "jamie@example.com".to_string(),
            quantity,
        }),
    )
    .await
    .expect("order created");
    order
}

async fn item_quantity(state: &Arc<ShopState>, item_id: i64) -> i64 {
    state
        .repos
        .inventory
        .find_by_id(item_id)
        .await
        .expect("query")
        .expect("item exists")
        .quantity
}

#[tokio::test]
async fn test_order_starts_pending_with_computed_total() {
    let (state, _store) = setup().await;
    let item_id = seed_item(&state, "PANEL-400W", 100, 24_900).await;

    let order = place_order(&state, item_id, 3).await;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_cents, 3 * 24_900);

    // Placing an order reserves nothing.
    assert_eq!(item_quantity(&state, item_id).await, 100);
}

#[tokio::test]
async fn test_order_must_reference_existing_item() {
    let (state, _store) = setup().await;

    let result = create_order_handler(
        State(state.clone()),
        Json(CreateOrderRequest {
            item_id: 999,
            customer_name: "Jamie Example".to_string(),
            customer_email: "jamie@example.com".to_string(),
            quantity: 1,
        }),
    )
    .await;

    assert!(matches!(result, Err(SolarifyError::ValidationError(_))));
}

#[tokio::test]
async fn test_confirm_decrements_stock() {
    let (state, store) = setup().await;
    let user_id = seed_in_app_user(&state).await;
    let item_id = seed_item(&state, "PANEL-400W", 100, 24_900).await;
    let order = place_order(&state, item_id, 3).await;

    let Json(confirmed) = confirm_order_handler(State(state.clone()), Path(order.id))
        .await
        .expect("confirmed");

    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert_eq!(item_quantity(&state, item_id).await, 97);
    // 100 -> 97 crosses no threshold.
    assert!(store.list_for_user(user_id).is_empty());
}

#[tokio::test]
async fn test_confirm_fires_threshold_alerts() {
    let (state, store) = setup().await;
    let user_id = seed_in_app_user(&state).await;
    let item_id = seed_item(&state, "PANEL-400W", 12, 24_900).await;
    let order = place_order(&state, item_id, 3).await;

    confirm_order_handler(State(state.clone()), Path(order.id))
        .await
        .expect("confirmed");

    // 12 -> 9 crosses the 10 and 9 thresholds, one alert each.
    let alerts = store.list_for_user(user_id);
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a.subject.contains("Item PANEL-400W")));
}

#[tokio::test]
async fn test_confirm_with_insufficient_stock_conflicts() {
    let (state, _store) = setup().await;
    let item_id = seed_item(&state, "PANEL-400W", 2, 24_900).await;
    let order = place_order(&state, item_id, 5).await;

    let result = confirm_order_handler(State(state.clone()), Path(order.id)).await;
    assert!(matches!(result, Err(SolarifyError::ConflictError(_))));

    // Nothing moved: stock untouched, order still pending.
    assert_eq!(item_quantity(&state, item_id).await, 2);
    let order = state
        .repos
        .orders
        .find_by_id(order.id)
        .await
        .expect("query")
        .expect("order exists");
    assert_eq!(order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_confirm_twice_conflicts() {
    let (state, _store) = setup().await;
    let item_id = seed_item(&state, "PANEL-400W", 100, 24_900).await;
    let order = place_order(&state, item_id, 3).await;

    confirm_order_handler(State(state.clone()), Path(order.id))
        .await
        .expect("first confirm");
    let result = confirm_order_handler(State(state.clone()), Path(order.id)).await;

    assert!(matches!(result, Err(SolarifyError::ConflictError(_))));
    // Stock was only taken once.
    assert_eq!(item_quantity(&state, item_id).await, 97);
}

#[tokio::test]
async fn test_cancel_confirmed_order_restocks() {
    let (state, _store) = setup().await;
    let item_id = seed_item(&state, "PANEL-400W", 100, 24_900).await;
    let order = place_order(&state, item_id, 4).await;

    confirm_order_handler(State(state.clone()), Path(order.id))
        .await
        .expect("confirmed");
    assert_eq!(item_quantity(&state, item_id).await, 96);

    let Json(cancelled) = cancel_order_handler(State(state.clone()), Path(order.id))
        .await
        .expect("cancelled");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(item_quantity(&state, item_id).await, 100);
}

#[tokio::test]
async fn test_cancel_pending_order_does_not_restock() {
    let (state, _store) = setup().await;
    let item_id = seed_item(&state, "PANEL-400W", 100, 24_900).await;
    let order = place_order(&state, item_id, 4).await;

    let Json(cancelled) = cancel_order_handler(State(state.clone()), Path(order.id))
        .await
        .expect("cancelled");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(item_quantity(&state, item_id).await, 100);
}

#[tokio::test]
async fn test_cancelled_order_is_terminal() {
    let (state, _store) = setup().await;
    let item_id = seed_item(&state, "PANEL-400W", 100, 24_900).await;
    let order = place_order(&state, item_id, 4).await;

    cancel_order_handler(State(state.clone()), Path(order.id))
        .await
        .expect("cancelled");

    let recancel = cancel_order_handler(State(state.clone()), Path(order.id)).await;
    assert!(matches!(recancel, Err(SolarifyError::ConflictError(_))));

    let reconfirm = confirm_order_handler(State(state.clone()), Path(order.id)).await;
    assert!(matches!(reconfirm, Err(SolarifyError::ConflictError(_))));
}

#[tokio::test]
async fn test_low_stock_uses_default_threshold() {
    let (state, _store) = setup().await;
    seed_item(&state, "LOW-5", 5, 1_000).await;
    seed_item(&state, "EDGE-20", 20, 1_000).await;
    seed_item(&state, "HIGH-21", 21, 1_000).await;

    let Json(items) = low_stock_handler(
        State(state.clone()),
        Query(LowStockQuery { threshold: None }),
    )
    .await
    .expect("low stock listed");

    let skus: Vec<&str> = items.iter().map(|i| i.sku.as_str()).collect();
    assert_eq!(skus, vec!["LOW-5", "EDGE-20"]);
}
