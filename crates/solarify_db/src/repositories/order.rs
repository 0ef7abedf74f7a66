//! Repository for shop orders

use crate::error::DbError;
use crate::models::{NewOrder, Order, OrderStatus};
use crate::repositories::{now_db, parse_enum, ts_from_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait OrderRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn create(
        &self,
        order: NewOrder,
    ) -> impl std::future::Future<Output = Result<Order, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Order>, DbError>> + Send;

    fn list(
        &self,
        status: Option<OrderStatus>,
    ) -> impl std::future::Future<Output = Result<Vec<Order>, DbError>> + Send;

    /// Move an order from one status to another. Returns false when the
    /// order is not currently in `from`, so callers can map a stale
    /// transition to a conflict instead of clobbering state.
    fn set_status(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}

/// SQL implementation of the order repository
#[derive(Debug, Clone)]
pub struct SqlOrderRepository {
    db_client: DbClient,
}

impl SqlOrderRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<Order, DbError> {
        let status: String = row.try_get("status")?;
        Ok(Order {
            id: row.try_get("id")?,
            item_id: row.try_get("item_id")?,
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            quantity: row.try_get("quantity")?,
            total_cents: row.try_get("total_cents")?,
            status: parse_enum(&status, "status")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const ORDER_COLUMNS: &str =
    "id, item_id, customer_name, customer_email, quantity, total_cents, status, created_at";

impl OrderRepository for SqlOrderRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing orders schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL REFERENCES inventory_items(id),
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                total_cents INTEGER NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, order: NewOrder) -> Result<Order, DbError> {
        debug!(
            "Creating order for item {} x{}",
            order.item_id, order.quantity
        );

        // Every order starts out pending; confirmation is a separate,
        // guarded transition.
        let query = format!(
            r#"
            INSERT INTO orders
                (item_id, customer_name, customer_email, quantity, total_cents, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(order.item_id)
            .bind(&order.customer_name)
            .bind(&order.customer_email)
            .bind(order.quantity)
            .bind(order.total_cents)
            .bind(OrderStatus::Pending.as_str())
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, DbError> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, DbError> {
        let rows = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE status = $1 ORDER BY created_at DESC"
                );
                sqlx::query(&query)
                    .bind(status.as_str())
                    .fetch_all(self.db_client.pool())
                    .await
            }
            None => {
                let query = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC");
                sqlx::query(&query).fetch_all(self.db_client.pool()).await
            }
        }
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn set_status(&self, id: i64, from: OrderStatus, to: OrderStatus) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2 AND status = $3")
            .bind(to.as_str())
            .bind(id)
            .bind(from.as_str())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
