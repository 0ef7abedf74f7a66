//! Repository for companies
//!
//! Companies are the anchor of the CRM side: contacts and opportunities
//! reference them by foreign key.

use crate::error::DbError;
use crate::models::{Company, NewCompany, UpdateCompany};
use crate::repositories::{now_db, ts_from_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

/// Repository for companies
pub trait CompanyRepository {
    /// Initialize the database schema for companies.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new company and return it with its id set.
    fn create(
        &self,
        company: NewCompany,
    ) -> impl std::future::Future<Output = Result<Company, DbError>> + Send;

    /// Find a company by id.
    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Company>, DbError>> + Send;

    /// List all companies, ordered by name.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Company>, DbError>> + Send;

    /// Apply a partial update; `None` fields keep their current value.
    ///
    /// Returns the updated company, or `None` if the id does not exist.
    fn update(
        &self,
        id: i64,
        changes: UpdateCompany,
    ) -> impl std::future::Future<Output = Result<Option<Company>, DbError>> + Send;

    /// Delete a company. Returns `true` when a row was removed.
    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}

/// SQL implementation of the company repository
#[derive(Debug, Clone)]
pub struct SqlCompanyRepository {
    db_client: DbClient,
}

impl SqlCompanyRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<Company, DbError> {
        Ok(Company {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            industry: row.try_get("industry")?,
            website: row.try_get("website")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            notes: row.try_get("notes")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const COMPANY_COLUMNS: &str = "id, name, industry, website, phone, address, notes, created_at";

impl CompanyRepository for SqlCompanyRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing company schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS companies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                industry TEXT,
                website TEXT,
                phone TEXT,
                address TEXT,
                notes TEXT,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, company: NewCompany) -> Result<Company, DbError> {
        debug!("Creating company: {}", company.name);

        let query = format!(
            r#"
            INSERT INTO companies (name, industry, website, phone, address, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COMPANY_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&company.name)
            .bind(&company.industry)
            .bind(&company.website)
            .bind(&company.phone)
            .bind(&company.address)
            .bind(&company.notes)
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>, DbError> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Company>, DbError> {
        let query = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update(&self, id: i64, changes: UpdateCompany) -> Result<Option<Company>, DbError> {
        let query = format!(
            r#"
            UPDATE companies SET
                name = COALESCE($1, name),
                industry = COALESCE($2, industry),
                website = COALESCE($3, website),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                notes = COALESCE($6, notes)
            WHERE id = $7
            RETURNING {COMPANY_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&changes.name)
            .bind(&changes.industry)
            .bind(&changes.website)
            .bind(&changes.phone)
            .bind(&changes.address)
            .bind(&changes.notes)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
