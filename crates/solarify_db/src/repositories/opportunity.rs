//! Repository for sales opportunities

use crate::error::DbError;
use crate::models::{NewOpportunity, Opportunity, OpportunityStage, UpdateOpportunity};
use crate::repositories::{date_from_db, date_to_db, now_db, parse_enum, ts_from_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait OpportunityRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn create(
        &self,
        opportunity: NewOpportunity,
    ) -> impl std::future::Future<Output = Result<Opportunity, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Opportunity>, DbError>> + Send;

    /// List opportunities, optionally restricted to one pipeline stage.
    fn list(
        &self,
        stage: Option<OpportunityStage>,
    ) -> impl std::future::Future<Output = Result<Vec<Opportunity>, DbError>> + Send;

    fn update(
        &self,
        id: i64,
        changes: UpdateOpportunity,
    ) -> impl std::future::Future<Output = Result<Option<Opportunity>, DbError>> + Send;

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}

/// SQL implementation of the opportunity repository
#[derive(Debug, Clone)]
pub struct SqlOpportunityRepository {
    db_client: DbClient,
}

impl SqlOpportunityRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<Opportunity, DbError> {
        let stage: String = row.try_get("stage")?;
        Ok(Opportunity {
            id: row.try_get("id")?,
            company_id: row.try_get("company_id")?,
            contact_id: row.try_get("contact_id")?,
            title: row.try_get("title")?,
            stage: parse_enum(&stage, "stage")?,
            amount_cents: row.try_get("amount_cents")?,
            close_date: date_from_db(row.try_get("close_date").ok()),
            notes: row.try_get("notes")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const OPPORTUNITY_COLUMNS: &str =
    "id, company_id, contact_id, title, stage, amount_cents, close_date, notes, created_at";

impl OpportunityRepository for SqlOpportunityRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing opportunity schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS opportunities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                company_id INTEGER NOT NULL REFERENCES companies(id),
                contact_id INTEGER REFERENCES contacts(id) ON DELETE SET NULL,
                title TEXT NOT NULL,
                stage TEXT NOT NULL,
                amount_cents INTEGER NOT NULL DEFAULT 0,
                close_date TEXT,
                notes TEXT,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, opportunity: NewOpportunity) -> Result<Opportunity, DbError> {
        debug!("Creating opportunity: {}", opportunity.title);

        let query = format!(
            r#"
            INSERT INTO opportunities
                (company_id, contact_id, title, stage, amount_cents, close_date, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(opportunity.company_id)
            .bind(opportunity.contact_id)
            .bind(&opportunity.title)
            .bind(opportunity.stage.as_str())
            .bind(opportunity.amount_cents)
            .bind(opportunity.close_date.map(date_to_db))
            .bind(&opportunity.notes)
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Opportunity>, DbError> {
        let query = format!("SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self, stage: Option<OpportunityStage>) -> Result<Vec<Opportunity>, DbError> {
        let rows = match stage {
            Some(stage) => {
                let query = format!(
                    "SELECT {OPPORTUNITY_COLUMNS} FROM opportunities WHERE stage = $1 \
                     ORDER BY created_at DESC"
                );
                sqlx::query(&query)
                    .bind(stage.as_str())
                    .fetch_all(self.db_client.pool())
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {OPPORTUNITY_COLUMNS} FROM opportunities ORDER BY created_at DESC"
                );
                sqlx::query(&query).fetch_all(self.db_client.pool()).await
            }
        }
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateOpportunity,
    ) -> Result<Option<Opportunity>, DbError> {
        let query = format!(
            r#"
            UPDATE opportunities SET
                contact_id = COALESCE($1, contact_id),
                title = COALESCE($2, title),
                stage = COALESCE($3, stage),
                amount_cents = COALESCE($4, amount_cents),
                close_date = COALESCE($5, close_date),
                notes = COALESCE($6, notes)
            WHERE id = $7
            RETURNING {OPPORTUNITY_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(changes.contact_id)
            .bind(&changes.title)
            .bind(changes.stage.map(|s| s.as_str()))
            .bind(changes.amount_cents)
            .bind(changes.close_date.map(date_to_db))
            .bind(&changes.notes)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM opportunities WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
