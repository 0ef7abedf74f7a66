// --- File: crates/solarify_shop/src/logic_test.rs ---
use crate::logic::{
    validate_item_update, validate_new_item, validate_new_order, validate_restock,
    CreateOrderRequest, RestockRequest, DEFAULT_LOW_STOCK_THRESHOLD,
};
use solarify_db::models::{NewInventoryItem, UpdateInventoryItem};

fn item(sku: &str, name: &str, quantity: i64, unit_price_cents: i64) -> NewInventoryItem {
    NewInventoryItem {
        sku: sku.to_string(),
        name: name.to_string(),
        description: None,
        category: None,
        quantity,
        unit_price_cents,
    }
}

fn order(name: &str, email: &str, quantity: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        item_id: 1,
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        quantity,
    }
}

#[test]
fn test_item_requires_sku_and_name() {
    assert!(validate_new_item(&item("PANEL-400W", "400W Panel", 10, 24_900)).is_ok());
    assert!(validate_new_item(&item("", "400W Panel", 10, 24_900)).is_err());
    assert!(validate_new_item(&item("PANEL-400W", "  ", 10, 24_900)).is_err());
}

#[test]
fn test_item_quantities_and_prices_are_non_negative() {
    assert!(validate_new_item(&item("INV-1", "Inverter", 0, 0)).is_ok());
    assert!(validate_new_item(&item("INV-1", "Inverter", -1, 100)).is_err());
    assert!(validate_new_item(&item("INV-1", "Inverter", 1, -100)).is_err());
}

#[test]
fn test_item_update_checks_provided_fields_only() {
    assert!(validate_item_update(&UpdateInventoryItem::default()).is_ok());
    assert!(validate_item_update(&UpdateInventoryItem {
        name: Some("Renamed".to_string()),
        ..Default::default()
    })
    .is_ok());
    assert!(validate_item_update(&UpdateInventoryItem {
        name: Some("".to_string()),
        ..Default::default()
    })
    .is_err());
    assert!(validate_item_update(&UpdateInventoryItem {
        unit_price_cents: Some(-1),
        ..Default::default()
    })
    .is_err());
}

#[test]
fn test_order_requires_customer_and_positive_quantity() {
    assert!(validate_new_order(&order("Jamie", "jamie@example.com", 1)).is_ok());
    assert!(validate_new_order(&order("", "jamie@example.com", 1)).is_err());
    assert!(validate_new_order(&order("Jamie", "not-an-email", 1)).is_err());
    assert!(validate_new_order(&order("Jamie", "jamie@example.com", 0)).is_err());
    assert!(validate_new_order(&order("Jamie", "jamie@example.com", -3)).is_err());
}

#[test]
fn test_restock_quantity_at_least_one() {
    assert!(validate_restock(&RestockRequest { quantity: 1 }).is_ok());
    assert!(validate_restock(&RestockRequest { quantity: 500 }).is_ok());
    assert!(validate_restock(&RestockRequest { quantity: 0 }).is_err());
    assert!(validate_restock(&RestockRequest { quantity: -5 }).is_err());
}

#[test]
fn test_default_threshold() {
    assert_eq!(DEFAULT_LOW_STOCK_THRESHOLD, 20);
}
