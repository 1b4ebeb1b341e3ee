//! SQLx implementation of the booking repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{corrupt_column, database_error};
use crate::domain::auth::UserId;
use crate::domain::bookings::{
    Booking, BookingCustomer, BookingDetails, BookingId, BookingService, BookingStatus,
    IBookingRepository,
};
use crate::domain::catalog::ServiceId;
use crate::domain::errors::DomainError;

// Left joins keep bookings whose customer or service row is gone
const BOOKING_SELECT: &str = r#"
    SELECT
        b.id, b.user_id, b.service_id, b.status, b.booking_date, b.notes,
        b.total_amount, b.created_at, b.updated_at,
        u.name AS customer_name, u.email AS customer_email, u.phone AS customer_phone,
        s.title AS service_title, s.price AS service_price,
        s.category AS service_category, s.location AS service_location
    FROM bookings b
    LEFT JOIN users u ON u.id = b.user_id
    LEFT JOIN services s ON s.id = b.service_id
"#;

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    service_id: Uuid,
    status: String,
    booking_date: DateTime<Utc>,
    notes: Option<String>,
    total_amount: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    service_title: Option<String>,
    service_price: Option<Decimal>,
    service_category: Option<String>,
    service_location: Option<String>,
}

impl TryFrom<BookingRow> for BookingDetails {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|e| corrupt_column("bookings", "status", e))?;

        let customer = match (row.customer_name, row.customer_email) {
            (Some(name), Some(email)) => Some(BookingCustomer {
                name,
                email,
                phone: row.customer_phone.unwrap_or_default(),
            }),
            _ => None,
        };

        let service = match (row.service_title, row.service_price) {
            (Some(title), Some(price)) => Some(BookingService {
                title,
                price,
                category: row.service_category.unwrap_or_default(),
                location: row.service_location,
            }),
            _ => None,
        };

        Ok(BookingDetails {
            booking: Booking {
                booking_id: BookingId::from(row.id),
                user_id: UserId::from(row.user_id),
                service_id: ServiceId::from(row.service_id),
                status,
                booking_date: row.booking_date,
                notes: row.notes,
                total_amount: row.total_amount,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            customer,
            service,
        })
    }
}

fn into_details(rows: Vec<BookingRow>) -> Result<Vec<BookingDetails>, DomainError> {
    rows.into_iter().map(BookingDetails::try_from).collect()
}

pub struct SqlxBookingRepository {
    pool: Arc<PgPool>,
}

impl SqlxBookingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IBookingRepository for SqlxBookingRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<BookingDetails>, DomainError> {
        let sql = format!("{BOOKING_SELECT} ORDER BY b.created_at DESC");
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| database_error("bookings", "listing bookings", e))?;

        into_details(rows)
    }

    #[tracing::instrument(skip(self), fields(booking_id = %booking_id))]
    async fn find_by_id(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<BookingDetails>, DomainError> {
        let sql = format!("{BOOKING_SELECT} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booking_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| database_error("bookings", "finding booking", e))?;

        row.map(BookingDetails::try_from).transpose()
    }

    #[tracing::instrument(skip(self), fields(booking_id = %booking_id, from = %from, to = %to))]
    async fn update_status(
        &self,
        booking_id: &BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(booking_id.as_uuid())
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| database_error("bookings", "updating booking status", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<BookingDetails>, DomainError> {
        let sql = format!("{BOOKING_SELECT} ORDER BY b.created_at DESC LIMIT $1");
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(limit)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| database_error("bookings", "listing recent bookings", e))?;

        into_details(rows)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| database_error("bookings", "counting bookings", e))
    }
}
