//! Repository for contacts
//!
//! A contact may belong to a company; deleting the company keeps the contact
//! and nulls the reference.

use crate::error::DbError;
use crate::models::{Contact, NewContact, UpdateContact};
use crate::repositories::{now_db, ts_from_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait ContactRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn create(
        &self,
        contact: NewContact,
    ) -> impl std::future::Future<Output = Result<Contact, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Contact>, DbError>> + Send;

    /// List contacts, optionally restricted to one company.
    fn list(
        &self,
        company_id: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<Contact>, DbError>> + Send;

    fn update(
        &self,
        id: i64,
        changes: UpdateContact,
    ) -> impl std::future::Future<Output = Result<Option<Contact>, DbError>> + Send;

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}

/// SQL implementation of the contact repository
#[derive(Debug, Clone)]
pub struct SqlContactRepository {
    db_client: DbClient,
}

impl SqlContactRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<Contact, DbError> {
        Ok(Contact {
            id: row.try_get("id")?,
            company_id: row.try_get("company_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            title: row.try_get("title")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const CONTACT_COLUMNS: &str =
    "id, company_id, first_name, last_name, email, phone, title, created_at";

impl ContactRepository for SqlContactRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing contact schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                company_id INTEGER REFERENCES companies(id) ON DELETE SET NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                title TEXT,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, DbError> {
        debug!(
            "Creating contact: {} {}",
            contact.first_name, contact.last_name
        );

        let query = format!(
            r#"
            INSERT INTO contacts (company_id, first_name, last_name, email, phone, title, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(contact.company_id)
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(&contact.email)
            .bind(&contact.phone)
            .bind(&contact.title)
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, DbError> {
        let query = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self, company_id: Option<i64>) -> Result<Vec<Contact>, DbError> {
        let rows = match company_id {
            Some(company_id) => {
                let query = format!(
                    "SELECT {CONTACT_COLUMNS} FROM contacts WHERE company_id = $1 \
                     ORDER BY last_name, first_name"
                );
                sqlx::query(&query)
                    .bind(company_id)
                    .fetch_all(self.db_client.pool())
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY last_name, first_name"
                );
                sqlx::query(&query).fetch_all(self.db_client.pool()).await
            }
        }
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update(&self, id: i64, changes: UpdateContact) -> Result<Option<Contact>, DbError> {
        let query = format!(
            r#"
            UPDATE contacts SET
                company_id = COALESCE($1, company_id),
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                title = COALESCE($6, title)
            WHERE id = $7
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(changes.company_id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.email)
            .bind(&changes.phone)
            .bind(&changes.title)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
