//! Repository for social media posts

use crate::error::DbError;
use crate::models::{NewSocialPost, PostStatus, SocialPost, UpdateSocialPost};
use crate::repositories::{now_db, parse_enum, ts_from_db, ts_to_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait SocialPostRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn create(
        &self,
        post: NewSocialPost,
    ) -> impl std::future::Future<Output = Result<SocialPost, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<SocialPost>, DbError>> + Send;

    fn list(
        &self,
        campaign_id: Option<i64>,
        status: Option<PostStatus>,
    ) -> impl std::future::Future<Output = Result<Vec<SocialPost>, DbError>> + Send;

    fn update(
        &self,
        id: i64,
        changes: UpdateSocialPost,
    ) -> impl std::future::Future<Output = Result<Option<SocialPost>, DbError>> + Send;

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}

/// SQL implementation of the social post repository
#[derive(Debug, Clone)]
pub struct SqlSocialPostRepository {
    db_client: DbClient,
}

impl SqlSocialPostRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<SocialPost, DbError> {
        let platform: String = row.try_get("platform")?;
        let status: String = row.try_get("status")?;
        Ok(SocialPost {
            id: row.try_get("id")?,
            campaign_id: row.try_get("campaign_id")?,
            platform: parse_enum(&platform, "platform")?,
            content: row.try_get("content")?,
            scheduled_for: ts_from_db(row.try_get("scheduled_for").ok()),
            status: parse_enum(&status, "status")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const POST_COLUMNS: &str =
    "id, campaign_id, platform, content, scheduled_for, status, created_at";

impl SocialPostRepository for SqlSocialPostRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing social posts schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS social_posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                campaign_id INTEGER REFERENCES campaigns(id) ON DELETE SET NULL,
                platform TEXT NOT NULL,
                content TEXT NOT NULL,
                scheduled_for TEXT,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, post: NewSocialPost) -> Result<SocialPost, DbError> {
        debug!("Creating {} post", post.platform.as_str());

        let query = format!(
            r#"
            INSERT INTO social_posts
                (campaign_id, platform, content, scheduled_for, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(post.campaign_id)
            .bind(post.platform.as_str())
            .bind(&post.content)
            .bind(post.scheduled_for.map(ts_to_db))
            .bind(post.status.as_str())
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SocialPost>, DbError> {
        let query = format!("SELECT {POST_COLUMNS} FROM social_posts WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(
        &self,
        campaign_id: Option<i64>,
        status: Option<PostStatus>,
    ) -> Result<Vec<SocialPost>, DbError> {
        let mut conditions = Vec::new();
        if campaign_id.is_some() {
            conditions.push(format!("campaign_id = ${}", conditions.len() + 1));
        }
        if status.is_some() {
            conditions.push(format!("status = ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT {POST_COLUMNS} FROM social_posts{where_clause} ORDER BY created_at DESC"
        );

        let mut q = sqlx::query(&query);
        if let Some(campaign_id) = campaign_id {
            q = q.bind(campaign_id);
        }
        if let Some(status) = status {
            q = q.bind(status.as_str());
        }

        let rows = q
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateSocialPost,
    ) -> Result<Option<SocialPost>, DbError> {
        let query = format!(
            r#"
            UPDATE social_posts SET
                campaign_id = COALESCE($1, campaign_id),
                content = COALESCE($2, content),
                scheduled_for = COALESCE($3, scheduled_for),
                status = COALESCE($4, status)
            WHERE id = $5
            RETURNING {POST_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(changes.campaign_id)
            .bind(&changes.content)
            .bind(changes.scheduled_for.map(ts_to_db))
            .bind(changes.status.map(|s| s.as_str()))
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM social_posts WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
