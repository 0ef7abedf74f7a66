//! Integration tests for the SQL repositories
//!
//! Every test runs against its own `sqlite::memory:` database, so they are
//! independent and need no external services.

use chrono::{Duration, NaiveDate, Utc};
use solarify_db::models::{
    NewCampaign, NewCompany, NewContact, NewInventoryItem, NewOpportunity, NewOrder,
    NewSocialPost, NewUser, CampaignStatus, NotificationPreference, OpportunityStage, OrderStatus,
    PostStatus, SocialPlatform, UpdateCompany, UpdateInventoryItem, UserRole,
};
use solarify_db::repositories::{
    CampaignRepository, CompanyRepository, ContactRepository, InventoryRepository,
    OpportunityRepository, OrderRepository, SessionRepository, SocialPostRepository,
    UserRepository,
};
use solarify_db::{DbClient, DbError, Repositories};

async fn setup() -> Repositories {
    let client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let repos = Repositories::new(client);
    repos.init_schema().await.unwrap();
    repos
}

fn test_company(name: &str) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        industry: Some("Renewables".to_string()),
        website: None,
        phone: None,
        address: None,
        notes: None,
    }
}

fn test_item(sku: &str, quantity: i64) -> NewInventoryItem {
    NewInventoryItem {
        sku: sku.to_string(),
        name: format!("Panel {sku}"),
        description: None,
        category: Some("panels".to_string()),
        quantity,
        unit_price_cents: 24_900,
    }
}

#[tokio::test]
async fn test_company_crud() {
    let repos = setup().await;

    let created = repos.companies.create(test_company("Helios GmbH")).await.unwrap();
    assert_eq!(created.name, "Helios GmbH");
    assert!(created.created_at.is_some());

    let found = repos.companies.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.industry, Some("Renewables".to_string()));

    // Partial update only touches the provided fields
    let updated = repos
        .companies
        .update(
            created.id,
            UpdateCompany {
                phone: Some("+41 44 000 00 00".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Helios GmbH");
    assert_eq!(updated.phone, Some("+41 44 000 00 00".to_string()));

    assert!(repos.companies.delete(created.id).await.unwrap());
    assert!(repos.companies.find_by_id(created.id).await.unwrap().is_none());
    assert!(!repos.companies.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn test_contact_list_filters_by_company() {
    let repos = setup().await;

    let company = repos.companies.create(test_company("SunWorks")).await.unwrap();
    let other = repos.companies.create(test_company("EcoVolt")).await.unwrap();

    for (first, company_id) in [("Ada", Some(company.id)), ("Ben", Some(other.id)), ("Cy", None)] {
        repos
            .contacts
            .create(NewContact {
                company_id,
                first_name: first.to_string(),
                last_name: "Tester".to_string(),
                email: format!("{}@example.com", first.to_lowercase()),
                phone: None,
                title: None,
            })
            .await
            .unwrap();
    }

    let all = repos.contacts.list(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let scoped = repos.contacts.list(Some(company.id)).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].first_name, "Ada");
}

#[tokio::test]
async fn test_opportunity_stage_filter() {
    let repos = setup().await;

    let company = repos.companies.create(test_company("SunWorks")).await.unwrap();
    for (title, stage) in [
        ("Rooftop array", OpportunityStage::Lead),
        ("Carport install", OpportunityStage::Proposal),
        ("Battery retrofit", OpportunityStage::Lead),
    ] {
        repos
            .opportunities
            .create(NewOpportunity {
                company_id: company.id,
                contact_id: None,
                title: title.to_string(),
                stage,
                amount_cents: 1_200_000,
                close_date: NaiveDate::from_ymd_opt(2025, 9, 30),
                notes: None,
            })
            .await
            .unwrap();
    }

    let leads = repos.opportunities.list(Some(OpportunityStage::Lead)).await.unwrap();
    assert_eq!(leads.len(), 2);
    assert!(leads.iter().all(|o| o.stage == OpportunityStage::Lead));

    let all = repos.opportunities.list(None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].close_date, NaiveDate::from_ymd_opt(2025, 9, 30));
}

#[tokio::test]
async fn test_inventory_sku_must_be_unique() {
    let repos = setup().await;

    repos.inventory.create(test_item("PV-400", 10)).await.unwrap();
    let result = repos.inventory.create(test_item("PV-400", 5)).await;

    assert!(matches!(result, Err(DbError::Conflict(_))));
}

#[tokio::test]
async fn test_decrement_stock_happy_path() {
    let repos = setup().await;

    let item = repos.inventory.create(test_item("PV-400", 10)).await.unwrap();
    let change = repos.inventory.decrement_stock(item.id, 3).await.unwrap();

    assert_eq!(change.previous, 10);
    assert_eq!(change.new, 7);

    let reloaded = repos.inventory.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.quantity, 7);
}

#[tokio::test]
async fn test_decrement_stock_to_exactly_zero() {
    let repos = setup().await;

    let item = repos.inventory.create(test_item("PV-400", 4)).await.unwrap();
    let change = repos.inventory.decrement_stock(item.id, 4).await.unwrap();

    assert_eq!(change.new, 0);
}

#[tokio::test]
async fn test_decrement_stock_insufficient_leaves_row_untouched() {
    let repos = setup().await;

    let item = repos.inventory.create(test_item("PV-400", 2)).await.unwrap();
    let result = repos.inventory.decrement_stock(item.id, 3).await;

    assert!(matches!(result, Err(DbError::Conflict(_))));

    // Quantity can never go negative, and a failed decrement changes nothing
    let reloaded = repos.inventory.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.quantity, 2);
}

#[tokio::test]
async fn test_decrement_stock_unknown_item() {
    let repos = setup().await;

    let result = repos.inventory.decrement_stock(9999, 1).await;
    assert!(matches!(result, Err(DbError::NotFound(_))));
}

#[tokio::test]
async fn test_restock_adds_quantity_back() {
    let repos = setup().await;

    let item = repos.inventory.create(test_item("PV-400", 1)).await.unwrap();
    repos.inventory.decrement_stock(item.id, 1).await.unwrap();
    let change = repos.inventory.restock(item.id, 1).await.unwrap();

    assert_eq!(change.previous, 0);
    assert_eq!(change.new, 1);
}

#[tokio::test]
async fn test_stock_change_pairs_track_the_row_across_movements() {
    let repos = setup().await;

    let item = repos.inventory.create(test_item("PV-400", 20)).await.unwrap();

    // Each reported pair must describe exactly the quantities around its own
    // statement, so consecutive changes chain without gaps.
    let first = repos.inventory.decrement_stock(item.id, 4).await.unwrap();
    let second = repos.inventory.decrement_stock(item.id, 6).await.unwrap();
    let back = repos.inventory.restock(item.id, 2).await.unwrap();

    assert_eq!((first.previous, first.new), (20, 16));
    assert_eq!((second.previous, second.new), (16, 10));
    assert_eq!((back.previous, back.new), (10, 12));

    let reloaded = repos.inventory.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.quantity, back.new);
}

#[tokio::test]
async fn test_low_stock_orders_by_quantity() {
    let repos = setup().await;

    repos.inventory.create(test_item("PV-100", 50)).await.unwrap();
    repos.inventory.create(test_item("PV-200", 5)).await.unwrap();
    repos.inventory.create(test_item("PV-300", 12)).await.unwrap();

    let low = repos.inventory.low_stock(20).await.unwrap();
    assert_eq!(low.len(), 2);
    assert_eq!(low[0].sku, "PV-200");
    assert_eq!(low[1].sku, "PV-300");
}

#[tokio::test]
async fn test_inventory_update_does_not_touch_quantity() {
    let repos = setup().await;

    let item = repos.inventory.create(test_item("PV-400", 10)).await.unwrap();
    let updated = repos
        .inventory
        .update(
            item.id,
            UpdateInventoryItem {
                unit_price_cents: Some(19_900),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.unit_price_cents, 19_900);
    assert_eq!(updated.quantity, 10);
}

#[tokio::test]
async fn test_order_status_transition_is_guarded() {
    let repos = setup().await;

    let item = repos.inventory.create(test_item("PV-400", 10)).await.unwrap();
    let order = repos
        .orders
        .create(NewOrder {
            item_id: item.id,
            customer_name: "Jane Prospect".to_string(),
            customer_email: "jane@example.com".to_string(),
            quantity: 2,
            total_cents: 49_800,
        })
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);

    let confirmed = repos
        .orders
        .set_status(order.id, OrderStatus::Pending, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert!(confirmed);

    // A second confirmation finds no pending row to move
    let again = repos
        .orders
        .set_status(order.id, OrderStatus::Pending, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert!(!again);

    let confirmed_orders = repos.orders.list(Some(OrderStatus::Confirmed)).await.unwrap();
    assert_eq!(confirmed_orders.len(), 1);
    assert_eq!(confirmed_orders[0].id, order.id);
}

#[tokio::test]
async fn test_session_expiry_is_enforced_on_read() {
    let repos = setup().await;

    let user = repos
        .users
        .create(NewUser {
            username: "ops".to_string(),
            email: "ops@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            role: UserRole::Staff,
            notification_preference: NotificationPreference::InApp,
        })
        .await
        .unwrap();

    let now = Utc::now();
    repos
        .sessions
        .create("live-token", user.id, now + Duration::hours(1))
        .await
        .unwrap();
    repos
        .sessions
        .create("stale-token", user.id, now - Duration::hours(1))
        .await
        .unwrap();

    assert!(repos.sessions.find_valid("live-token", now).await.unwrap().is_some());
    assert!(repos.sessions.find_valid("stale-token", now).await.unwrap().is_none());
    assert!(repos.sessions.find_valid("unknown-token", now).await.unwrap().is_none());

    let purged = repos.sessions.purge_expired(now).await.unwrap();
    assert_eq!(purged, 1);

    assert!(repos.sessions.delete("live-token").await.unwrap());
    assert!(repos.sessions.find_valid("live-token", now).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let repos = setup().await;

    let user = NewUser {
        username: "ops".to_string(),
        email: "ops@example.com".to_string(),
        password_hash: "argon2-hash".to_string(),
        role: UserRole::Admin,
        notification_preference: NotificationPreference::Email,
    };

    repos.users.create(user.clone()).await.unwrap();
    let result = repos.users.create(user).await;

    assert!(matches!(result, Err(DbError::Conflict(_))));
}

#[tokio::test]
async fn test_set_notification_preference() {
    let repos = setup().await;

    let user = repos
        .users
        .create(NewUser {
            username: "ops".to_string(),
            email: "ops@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            role: UserRole::Staff,
            notification_preference: NotificationPreference::InApp,
        })
        .await
        .unwrap();

    let updated = repos
        .users
        .set_notification_preference(user.id, NotificationPreference::Console)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.notification_preference, NotificationPreference::Console);
}

#[tokio::test]
async fn test_social_post_filters() {
    let repos = setup().await;

    let campaign = repos
        .campaigns
        .create(NewCampaign {
            name: "Summer push".to_string(),
            description: None,
            starts_on: NaiveDate::from_ymd_opt(2025, 6, 1),
            ends_on: NaiveDate::from_ymd_opt(2025, 8, 31),
            budget_cents: Some(500_000),
            status: CampaignStatus::Active,
        })
        .await
        .unwrap();

    repos
        .social_posts
        .create(NewSocialPost {
            campaign_id: Some(campaign.id),
            platform: SocialPlatform::Linkedin,
            content: "Go solar this summer".to_string(),
            scheduled_for: None,
            status: PostStatus::Draft,
        })
        .await
        .unwrap();
    repos
        .social_posts
        .create(NewSocialPost {
            campaign_id: None,
            platform: SocialPlatform::Facebook,
            content: "Published already".to_string(),
            scheduled_for: None,
            status: PostStatus::Published,
        })
        .await
        .unwrap();

    let in_campaign = repos.social_posts.list(Some(campaign.id), None).await.unwrap();
    assert_eq!(in_campaign.len(), 1);
    assert_eq!(in_campaign[0].platform, SocialPlatform::Linkedin);

    let drafts = repos.social_posts.list(None, Some(PostStatus::Draft)).await.unwrap();
    assert_eq!(drafts.len(), 1);

    let both = repos
        .social_posts
        .list(Some(campaign.id), Some(PostStatus::Published))
        .await
        .unwrap();
    assert!(both.is_empty());
}

#[tokio::test]
async fn test_campaign_dates_round_trip() {
    let repos = setup().await;

    let campaign = repos
        .campaigns
        .create(NewCampaign {
            name: "Autumn push".to_string(),
            description: Some("Leads from trade fairs".to_string()),
            starts_on: NaiveDate::from_ymd_opt(2025, 9, 1),
            ends_on: None,
            budget_cents: None,
            status: CampaignStatus::Planned,
        })
        .await
        .unwrap();

    let found = repos.campaigns.find_by_id(campaign.id).await.unwrap().unwrap();
    assert_eq!(found.starts_on, NaiveDate::from_ymd_opt(2025, 9, 1));
    assert_eq!(found.ends_on, None);
    assert_eq!(found.budget_cents, None);
    assert_eq!(found.status, CampaignStatus::Planned);
}
