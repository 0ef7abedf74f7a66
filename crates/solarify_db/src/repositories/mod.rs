//! Repository modules for database access
//!
//! One repository per aggregate of the CRM/e-commerce schema. Each module
//! defines the repository trait and its SQL implementation over `DbClient`.

pub mod booking;
pub mod campaign;
pub mod company;
pub mod contact;
pub mod inventory;
pub mod opportunity;
pub mod order;
pub mod session;
pub mod social_post;
pub mod user;

use crate::client::DbClient;
use crate::error::DbError;
use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

// Re-export the repository traits and implementations for ease of use
pub use booking::{BookingRepository, SqlBookingRepository};
pub use campaign::{CampaignRepository, SqlCampaignRepository};
pub use company::{CompanyRepository, SqlCompanyRepository};
pub use contact::{ContactRepository, SqlContactRepository};
pub use inventory::{InventoryRepository, SqlInventoryRepository};
pub use opportunity::{OpportunityRepository, SqlOpportunityRepository};
pub use order::{OrderRepository, SqlOrderRepository};
pub use session::{SessionRepository, SqlSessionRepository};
pub use social_post::{SocialPostRepository, SqlSocialPostRepository};
pub use user::{SqlUserRepository, UserRepository};

// Timestamps and dates are stored as TEXT (RFC 3339 / YYYY-MM-DD): the Any
// driver cannot decode chrono types, so every repository maps them by hand.

pub(crate) fn now_db() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn ts_to_db(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub(crate) fn ts_from_db(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn date_from_db(value: Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

pub(crate) fn parse_enum<T>(value: &str, column: &str) -> Result<T, DbError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| DbError::QueryError(format!("bad {column} column: {e}")))
}

/// All repositories bundled over one shared pool.
///
/// `DbClient` is cheap to clone (the pool is reference counted), so the
/// bundle hands each repository its own handle.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub companies: SqlCompanyRepository,
    pub contacts: SqlContactRepository,
    pub opportunities: SqlOpportunityRepository,
    pub inventory: SqlInventoryRepository,
    pub orders: SqlOrderRepository,
    pub social_posts: SqlSocialPostRepository,
    pub campaigns: SqlCampaignRepository,
    pub users: SqlUserRepository,
    pub sessions: SqlSessionRepository,
    pub bookings: SqlBookingRepository,
}

impl Repositories {
    pub fn new(db_client: DbClient) -> Self {
        Self {
            companies: SqlCompanyRepository::new(db_client.clone()),
            contacts: SqlContactRepository::new(db_client.clone()),
            opportunities: SqlOpportunityRepository::new(db_client.clone()),
            inventory: SqlInventoryRepository::new(db_client.clone()),
            orders: SqlOrderRepository::new(db_client.clone()),
            social_posts: SqlSocialPostRepository::new(db_client.clone()),
            campaigns: SqlCampaignRepository::new(db_client.clone()),
            users: SqlUserRepository::new(db_client.clone()),
            sessions: SqlSessionRepository::new(db_client.clone()),
            bookings: SqlBookingRepository::new(db_client),
        }
    }

    /// Create every table that does not exist yet, parents before children.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        self.companies.init_schema().await?;
        self.contacts.init_schema().await?;
        self.opportunities.init_schema().await?;
        self.inventory.init_schema().await?;
        self.orders.init_schema().await?;
        self.campaigns.init_schema().await?;
        self.social_posts.init_schema().await?;
        self.users.init_schema().await?;
        self.sessions.init_schema().await?;
        self.bookings.init_schema().await?;
        Ok(())
    }
}
