//! Repository for login sessions
//!
//! Sessions are keyed by an opaque random token. Expiry is enforced on read
//! (`find_valid` filters on `expires_at`) rather than by a background
//! sweeper; `purge_expired` exists for housekeeping at startup.

use crate::error::DbError;
use crate::models::Session;
use crate::repositories::{ts_from_db, ts_to_db};
use crate::DbClient;
use chrono::{DateTime, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait SessionRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn create(
        &self,
        token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Session, DbError>> + Send;

    /// Look up a session that has not expired as of `now`.
    fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Session>, DbError>> + Send;

    fn delete(&self, token: &str)
        -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    fn purge_expired(
        &self,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, DbError>> + Send;
}

/// SQL implementation of the session repository
#[derive(Debug, Clone)]
pub struct SqlSessionRepository {
    db_client: DbClient,
}

impl SqlSessionRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<Session, DbError> {
        let expires_at: String = row.try_get("expires_at")?;
        let expires_at = ts_from_db(Some(expires_at)).ok_or_else(|| {
            DbError::QueryError("session has an unparseable expires_at".to_string())
        })?;
        Ok(Session {
            token: row.try_get("token")?,
            user_id: row.try_get("user_id")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
            expires_at,
        })
    }
}

const SESSION_COLUMNS: &str = "token, user_id, created_at, expires_at";

impl SessionRepository for SqlSessionRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing sessions schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(
        &self,
        token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, DbError> {
        let query = format!(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {SESSION_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(token)
            .bind(user_id)
            .bind(ts_to_db(Utc::now()))
            .bind(ts_to_db(expires_at))
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, DbError> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE token = $1 AND expires_at > $2"
        );

        let row = sqlx::query(&query)
            .bind(token)
            .bind(ts_to_db(now))
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, token: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(ts_to_db(now))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
