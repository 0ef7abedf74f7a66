//! Repository for inventory items
//!
//! Stock movements go through `decrement_stock`/`restock` so quantity can
//! never be driven negative: the decrement is guarded by `quantity >= ?` on
//! the UPDATE itself, which closes the window where two concurrent orders
//! could both pass a read-then-write sufficiency check. The updated quantity
//! comes back via RETURNING from the same statement, so the reported change
//! is exact even when writers race.

use crate::error::DbError;
use crate::models::{InventoryItem, NewInventoryItem, StockChange, UpdateInventoryItem};
use crate::repositories::{now_db, ts_from_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait InventoryRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new item. Fails with [`DbError::Conflict`] when the sku exists.
    fn create(
        &self,
        item: NewInventoryItem,
    ) -> impl std::future::Future<Output = Result<InventoryItem, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<InventoryItem>, DbError>> + Send;

    fn find_by_sku(
        &self,
        sku: &str,
    ) -> impl std::future::Future<Output = Result<Option<InventoryItem>, DbError>> + Send;

    fn list(&self) -> impl std::future::Future<Output = Result<Vec<InventoryItem>, DbError>> + Send;

    /// Items with quantity at or below the given threshold, lowest first.
    fn low_stock(
        &self,
        threshold: i64,
    ) -> impl std::future::Future<Output = Result<Vec<InventoryItem>, DbError>> + Send;

    fn update(
        &self,
        id: i64,
        changes: UpdateInventoryItem,
    ) -> impl std::future::Future<Output = Result<Option<InventoryItem>, DbError>> + Send;

    fn delete(&self, id: i64) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Atomically subtract `quantity` from the item's stock.
    ///
    /// Returns [`DbError::NotFound`] for an unknown item and
    /// [`DbError::Conflict`] when the remaining stock is insufficient; the
    /// row is unchanged in both cases.
    fn decrement_stock(
        &self,
        id: i64,
        quantity: i64,
    ) -> impl std::future::Future<Output = Result<StockChange, DbError>> + Send;

    /// Add `quantity` back onto the item's stock (order cancellation).
    fn restock(
        &self,
        id: i64,
        quantity: i64,
    ) -> impl std::future::Future<Output = Result<StockChange, DbError>> + Send;
}

/// SQL implementation of the inventory repository
#[derive(Debug, Clone)]
pub struct SqlInventoryRepository {
    db_client: DbClient,
}

impl SqlInventoryRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<InventoryItem, DbError> {
        Ok(InventoryItem {
            id: row.try_get("id")?,
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            quantity: row.try_get("quantity")?,
            unit_price_cents: row.try_get("unit_price_cents")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const ITEM_COLUMNS: &str =
    "id, sku, name, description, category, quantity, unit_price_cents, created_at";

impl InventoryRepository for SqlInventoryRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing inventory schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS inventory_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sku TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                description TEXT,
                category TEXT,
                quantity INTEGER NOT NULL DEFAULT 0,
                unit_price_cents INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, item: NewInventoryItem) -> Result<InventoryItem, DbError> {
        debug!("Creating inventory item: {}", item.sku);

        if self.find_by_sku(&item.sku).await?.is_some() {
            return Err(DbError::Conflict(format!(
                "inventory item with sku '{}' already exists",
                item.sku
            )));
        }

        let query = format!(
            r#"
            INSERT INTO inventory_items
                (sku, name, description, category, quantity, unit_price_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ITEM_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&item.sku)
            .bind(&item.name)
            .bind(&item.description)
            .bind(&item.category)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<InventoryItem>, DbError> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM inventory_items WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<InventoryItem>, DbError> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM inventory_items WHERE sku = $1");

        let row = sqlx::query(&query)
            .bind(sku)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<InventoryItem>, DbError> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM inventory_items ORDER BY name");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn low_stock(&self, threshold: i64) -> Result<Vec<InventoryItem>, DbError> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE quantity <= $1 ORDER BY quantity"
        );

        let rows = sqlx::query(&query)
            .bind(threshold)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateInventoryItem,
    ) -> Result<Option<InventoryItem>, DbError> {
        let query = format!(
            r#"
            UPDATE inventory_items SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                category = COALESCE($3, category),
                unit_price_cents = COALESCE($4, unit_price_cents)
            WHERE id = $5
            RETURNING {ITEM_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(&changes.category)
            .bind(changes.unit_price_cents)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn decrement_stock(&self, id: i64, quantity: i64) -> Result<StockChange, DbError> {
        // One guarded statement applies the change and reads back the result,
        // so the previous/new pair cannot go stale under concurrent writers.
        let row = sqlx::query(
            "UPDATE inventory_items SET quantity = quantity - $1 \
             WHERE id = $2 AND quantity >= $1 RETURNING quantity",
        )
        .bind(quantity)
        .bind(id)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        if let Some(row) = row {
            let new: i64 = row.try_get("quantity")?;
            return Ok(StockChange {
                item_id: id,
                previous: new + quantity,
                new,
            });
        }

        // Zero rows: distinguish a missing item from insufficient stock.
        match self.find_by_id(id).await? {
            Some(item) => Err(DbError::Conflict(format!(
                "insufficient stock for item {id}: requested {quantity}, available {}",
                item.quantity
            ))),
            None => Err(DbError::NotFound(format!("inventory item {id} not found"))),
        }
    }

    async fn restock(&self, id: i64, quantity: i64) -> Result<StockChange, DbError> {
        let row = sqlx::query(
            "UPDATE inventory_items SET quantity = quantity + $1 \
             WHERE id = $2 RETURNING quantity",
        )
        .bind(quantity)
        .bind(id)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        match row {
            Some(row) => {
                let new: i64 = row.try_get("quantity")?;
                Ok(StockChange {
                    item_id: id,
                    previous: new - quantity,
                    new,
                })
            }
            None => Err(DbError::NotFound(format!("inventory item {id} not found"))),
        }
    }
}
