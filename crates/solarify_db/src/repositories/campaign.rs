//! Repository for marketing campaigns

use crate::error::DbError;
use crate::models::{Campaign, NewCampaign, UpdateCampaign};
use crate::repositories::{date_from_db, date_to_db, now_db, parse_enum, ts_from_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait CampaignRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn create(
        &self,
        campaign: NewCampaign,
    ) -> impl std::future::Future<Output = Result<Campaign, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Campaign>, DbError>> + Send;

    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Campaign>, DbError>> + Send;

    fn update(
        &self,
        id: i64,
        changes: UpdateCampaign,
    ) -> impl std::future::Future<Output = Result<Option<Campaign>, DbError>> + Send;

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}

/// SQL implementation of the campaign repository
#[derive(Debug, Clone)]
pub struct SqlCampaignRepository {
    db_client: DbClient,
}

impl SqlCampaignRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<Campaign, DbError> {
        let status: String = row.try_get("status")?;
        Ok(Campaign {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            starts_on: date_from_db(row.try_get("starts_on").ok()),
            ends_on: date_from_db(row.try_get("ends_on").ok()),
            budget_cents: row.try_get("budget_cents")?,
            status: parse_enum(&status, "status")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const CAMPAIGN_COLUMNS: &str =
    "id, name, description, starts_on, ends_on, budget_cents, status, created_at";

impl CampaignRepository for SqlCampaignRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing campaigns schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS campaigns (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                starts_on TEXT,
                ends_on TEXT,
                budget_cents INTEGER,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, campaign: NewCampaign) -> Result<Campaign, DbError> {
        debug!("Creating campaign: {}", campaign.name);

        let query = format!(
            r#"
            INSERT INTO campaigns
                (name, description, starts_on, ends_on, budget_cents, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&campaign.name)
            .bind(&campaign.description)
            .bind(campaign.starts_on.map(date_to_db))
            .bind(campaign.ends_on.map(date_to_db))
            .bind(campaign.budget_cents)
            .bind(campaign.status.as_str())
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, DbError> {
        let query = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Campaign>, DbError> {
        let query = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY created_at DESC");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update(&self, id: i64, changes: UpdateCampaign) -> Result<Option<Campaign>, DbError> {
        let query = format!(
            r#"
            UPDATE campaigns SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                starts_on = COALESCE($3, starts_on),
                ends_on = COALESCE($4, ends_on),
                budget_cents = COALESCE($5, budget_cents),
                status = COALESCE($6, status)
            WHERE id = $7
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(changes.starts_on.map(date_to_db))
            .bind(changes.ends_on.map(date_to_db))
            .bind(changes.budget_cents)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
