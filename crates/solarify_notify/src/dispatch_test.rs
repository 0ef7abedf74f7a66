// --- File: crates/solarify_notify/src/dispatch_test.rs ---
use crate::alerts::AlertStore;
use crate::dispatch::{
    alert_thresholds, crossed_thresholds, stock_alert_body, stock_alert_subject,
    NotificationDispatcher, STOCK_ALERT_THRESHOLDS,
};
use solarify_config::{AppConfig, DatabaseConfig, ServerConfig};
use solarify_db::models::{InventoryItem, NewUser, NotificationPreference, StockChange, UserRole};
use solarify_db::repositories::UserRepository;
use solarify_db::{DbClient, Repositories};
use std::sync::Arc;

fn base_config() -> Arc<AppConfig> {
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

fn item(quantity: i64) -> InventoryItem {
    InventoryItem {
        id: 1,
        sku: "PANEL-400W".to_string(),
        name: "400W Panel".to_string(),
        description: None,
        category: Some("panels".to_string()),
        quantity,
        unit_price_cents: 24_900,
        created_at: None,
    }
}

#[test]
fn test_thresholds_are_descending() {
    let all: Vec<i64> = alert_thresholds().collect();
    assert_eq!(all[..5], STOCK_ALERT_THRESHOLDS);
    assert!(all.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(*all.last().unwrap(), 1);
}

#[test]
fn test_crossing_into_single_digit_range() {
    assert_eq!(crossed_thresholds(12, 9), vec![10, 9]);
}

#[test]
fn test_large_drop_crosses_every_threshold_on_the_way() {
    assert_eq!(crossed_thresholds(250, 10), vec![200, 150, 100, 50, 20, 10]);
}

#[test]
fn test_drop_to_zero() {
    assert_eq!(crossed_thresholds(5, 0), vec![4, 3, 2, 1]);
}

#[test]
fn test_restock_never_alerts() {
    assert!(crossed_thresholds(9, 12).is_empty());
}

#[test]
fn test_already_below_threshold_does_not_realert() {
    // 20 -> 19 starts at the threshold, not above it.
    assert!(crossed_thresholds(20, 19).is_empty());
}

#[test]
fn test_landing_exactly_on_threshold_alerts() {
    assert_eq!(crossed_thresholds(21, 20), vec![20]);
}

#[test]
fn test_alert_text_names_item_and_quantities() {
    let item = item(9);
    let change = StockChange {
        item_id: 1,
        previous: 12,
        new: 9,
    };

    let subject = stock_alert_subject(&item, 10);
    assert!(subject.contains("400W Panel"));
    assert!(subject.contains("10"));

    let body = stock_alert_body(&item, &change, 10);
    assert!(body.contains("PANEL-400W"));
    assert!(body.contains("12"));
    assert!(body.contains("9"));
}

#[tokio::test]
async fn test_dispatch_stores_in_app_alerts_per_threshold() {
    let db_client = DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory db");
    let repos = Repositories::new(db_client);
    repos.init_schema().await.expect("schema");

    let user = repos
        .users
        .create(NewUser {
            username: "ops".to_string(),
            email: "ops@solarify.example".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Staff,
            notification_preference: NotificationPreference::InApp,
        })
        .await
        .expect("user");

    let store = Arc::new(AlertStore::default());
    let dispatcher = NotificationDispatcher::new(&base_config(), repos, store.clone());

    let change = StockChange {
        item_id: 1,
        previous: 30,
        new: 10,
    };
    dispatcher.notify_stock_change(&item(10), &change).await;

    // 30 -> 10 crosses 20 and 10.
    let alerts = store.list_for_user(user.id);
    assert_eq!(alerts.len(), 2);
    assert_eq!(store.unread_count(user.id), 2);
}

#[tokio::test]
async fn test_email_preference_without_smtp_falls_back_to_console() {
    let db_client = DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory db");
    let repos = Repositories::new(db_client);
    repos.init_schema().await.expect("schema");

    let user = repos
        .users
        .create(NewUser {
            username: "ops".to_string(),
            email: "ops@solarify.example".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Staff,
            notification_preference: NotificationPreference::Email,
        })
        .await
        .expect("user");

    // use_smtp is false in base_config, so no email channel exists.
    let store = Arc::new(AlertStore::default());
    let dispatcher = NotificationDispatcher::new(&base_config(), repos, store);

    assert_eq!(dispatcher.channel_for(&user).name(), "console");
}

#[tokio::test]
async fn test_dispatch_is_a_no_op_when_no_threshold_crossed() {
    let db_client = DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory db");
    let repos = Repositories::new(db_client);
    repos.init_schema().await.expect("schema");

    let user = repos
        .users
        .create(NewUser {
            username: "ops".to_string(),
            email: "ops@solarify.example".to_string(),
            password_hash: "x".to_string(),
            role: UserRole::Staff,
            notification_preference: NotificationPreference::InApp,
        })
        .await
        .expect("user");

    let store = Arc::new(AlertStore::default());
    let dispatcher = NotificationDispatcher::new(&base_config(), repos, store.clone());

    let change = StockChange {
        item_id: 1,
        previous: 500,
        new: 300,
    };
    dispatcher.notify_stock_change(&item(300), &change).await;

    assert!(store.list_for_user(user.id).is_empty());
}
