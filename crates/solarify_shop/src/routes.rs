// --- File: crates/solarify_shop/src/routes.rs ---
use crate::handlers::{
    cancel_order_handler, confirm_order_handler, create_item_handler, create_order_handler,
    delete_item_handler, get_item_handler, get_order_handler, list_items_handler,
    list_orders_handler, low_stock_handler, restock_item_handler, update_item_handler, ShopState,
};
use axum::{
    routing::{get, post},
    Router,
};
use solarify_config::AppConfig;
use solarify_db::Repositories;
use solarify_notify::{AlertStore, NotificationDispatcher};
use std::sync::Arc;

/// Creates a router containing all routes for the shop feature.
///
/// Takes the shared alert store so that confirmations feed the same inbox
/// the notification routes read from.
pub fn routes(config: Arc<AppConfig>, repos: Repositories, store: Arc<AlertStore>) -> Router {
    let dispatcher = NotificationDispatcher::new(&config, repos.clone(), store);
    let state = Arc::new(ShopState {
        config,
        repos,
        dispatcher,
    });

    Router::new()
        .route(
            "/shop/inventory",
            get(list_items_handler).post(create_item_handler),
        )
        .route("/shop/inventory/low-stock", get(low_stock_handler))
        .route(
            "/shop/inventory/{id}",
            get(get_item_handler)
                .patch(update_item_handler)
                .delete(delete_item_handler),
        )
        .route("/shop/inventory/{id}/restock", post(restock_item_handler))
        .route(
            "/shop/orders",
            get(list_orders_handler).post(create_order_handler),
        )
        .route("/shop/orders/{id}", get(get_order_handler))
        .route("/shop/orders/{id}/confirm", post(confirm_order_handler))
        .route("/shop/orders/{id}/cancel", post(cancel_order_handler))
        .with_state(state)
}
