//! Repository for staff user accounts
//!
//! Password hashes are stored as opaque strings; hashing and verification
//! happen in the auth crate so the repository never sees plaintext.

use crate::error::DbError;
use crate::models::{NewUser, NotificationPreference, User};
use crate::repositories::{now_db, parse_enum, ts_from_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait UserRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new user. Fails with [`DbError::Conflict`] when the username
    /// is taken.
    fn create(&self, user: NewUser)
        -> impl std::future::Future<Output = Result<User, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, DbError>> + Send;

    fn set_notification_preference(
        &self,
        id: i64,
        preference: NotificationPreference,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;
}

/// SQL implementation of the user repository
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    db_client: DbClient,
}

impl SqlUserRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<User, DbError> {
        let role: String = row.try_get("role")?;
        let preference: String = row.try_get("notification_preference")?;
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: parse_enum(&role, "role")?,
            notification_preference: parse_enum(&preference, "notification_preference")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, notification_preference, created_at";

impl UserRepository for SqlUserRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing users schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                notification_preference TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        debug!("Creating user: {}", user.username);

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(DbError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            )));
        }

        let query = format!(
            r#"
            INSERT INTO users
                (username, email, password_hash, role, notification_preference, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.notification_preference.as_str())
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn set_notification_preference(
        &self,
        id: i64,
        preference: NotificationPreference,
    ) -> Result<Option<User>, DbError> {
        let query = format!(
            "UPDATE users SET notification_preference = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(preference.as_str())
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }
}
