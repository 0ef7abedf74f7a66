//! Repository for calendar bookings

use crate::error::DbError;
use crate::models::{Booking, BookingStatus, NewBooking};
use crate::repositories::{now_db, parse_enum, ts_from_db, ts_to_db};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

pub trait BookingRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    fn create(
        &self,
        booking: NewBooking,
    ) -> impl std::future::Future<Output = Result<Booking, DbError>> + Send;

    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Flip a confirmed booking to cancelled. Returns false when the booking
    /// was already cancelled, so repeat cancellations surface as conflicts.
    fn cancel(&self, id: i64) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn map_row(row: &AnyRow) -> Result<Booking, DbError> {
        let service_type: String = row.try_get("service_type")?;
        let status: String = row.try_get("status")?;
        let starts_at: String = row.try_get("starts_at")?;
        let ends_at: String = row.try_get("ends_at")?;
        let starts_at = ts_from_db(Some(starts_at))
            .ok_or_else(|| DbError::QueryError("booking has an unparseable starts_at".to_string()))?;
        let ends_at = ts_from_db(Some(ends_at))
            .ok_or_else(|| DbError::QueryError("booking has an unparseable ends_at".to_string()))?;
        Ok(Booking {
            id: row.try_get("id")?,
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            customer_phone: row.try_get("customer_phone")?,
            service_type: parse_enum(&service_type, "service_type")?,
            starts_at,
            ends_at,
            notes: row.try_get("notes")?,
            calendar_event_id: row.try_get("calendar_event_id")?,
            status: parse_enum(&status, "status")?,
            created_at: ts_from_db(row.try_get("created_at").ok()),
        })
    }
}

const BOOKING_COLUMNS: &str = "id, customer_name, customer_email, customer_phone, service_type, \
                               starts_at, ends_at, notes, calendar_event_id, status, created_at";

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing bookings schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                customer_phone TEXT NOT NULL,
                service_type TEXT NOT NULL,
                starts_at TEXT NOT NULL,
                ends_at TEXT NOT NULL,
                notes TEXT,
                calendar_event_id TEXT,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, booking: NewBooking) -> Result<Booking, DbError> {
        debug!(
            "Creating {} booking at {}",
            booking.service_type.as_str(),
            booking.starts_at
        );

        let query = format!(
            r#"
            INSERT INTO bookings
                (customer_name, customer_email, customer_phone, service_type,
                 starts_at, ends_at, notes, calendar_event_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {BOOKING_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&booking.customer_name)
            .bind(&booking.customer_email)
            .bind(&booking.customer_phone)
            .bind(booking.service_type.as_str())
            .bind(ts_to_db(booking.starts_at))
            .bind(ts_to_db(booking.ends_at))
            .bind(&booking.notes)
            .bind(&booking.calendar_event_id)
            .bind(BookingStatus::Confirmed.as_str())
            .bind(now_db())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Self::map_row(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, DbError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Booking>, DbError> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY starts_at DESC");

        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn cancel(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'cancelled' WHERE id = $1 AND status = 'confirmed'",
        )
        .bind(id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
