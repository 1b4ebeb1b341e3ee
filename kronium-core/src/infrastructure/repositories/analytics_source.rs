//! Read-only analytics queries

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{corrupt_column, database_error};
use crate::domain::analytics::{
    BookingRecord, EntityTotals, IAnalyticsSource, ServiceSnapshot, TimeWindow,
};
use crate::domain::auth::UserId;
use crate::domain::bookings::{BookingId, BookingStatus};
use crate::domain::catalog::ServiceId;
use crate::domain::errors::DomainError;

#[derive(sqlx::FromRow)]
struct TotalsRow {
    users: i64,
    services: i64,
    bookings: i64,
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    id: Uuid,
    service_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    total_amount: Option<Decimal>,
    status: String,
    service_title: Option<String>,
    service_price: Option<Decimal>,
    service_category: Option<String>,
}

impl TryFrom<RecordRow> for BookingRecord {
    type Error = DomainError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|e| corrupt_column("bookings", "status", e))?;

        let service = match (row.service_title, row.service_price) {
            (Some(title), Some(price)) => Some(ServiceSnapshot {
                title,
                price,
                category: row.service_category,
            }),
            _ => None,
        };

        Ok(BookingRecord {
            booking_id: BookingId::from(row.id),
            service_id: ServiceId::from(row.service_id),
            customer_id: UserId::from(row.user_id),
            created_at: row.created_at,
            amount: row.total_amount,
            status,
            service,
        })
    }
}

/// Postgres-backed [`IAnalyticsSource`]
pub struct SqlxAnalyticsSource {
    pool: Arc<PgPool>,
}

impl SqlxAnalyticsSource {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IAnalyticsSource for SqlxAnalyticsSource {
    async fn entity_totals(&self) -> Result<EntityTotals, DomainError> {
        let row = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM services) AS services,
                (SELECT COUNT(*) FROM bookings) AS bookings
            "#,
        )
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| database_error("bookings", "counting entities", e))?;

        Ok(EntityTotals {
            users: row.users,
            services: row.services,
            bookings: row.bookings,
        })
    }

    #[tracing::instrument(skip(self), fields(start = %window.start, end = %window.end))]
    async fn bookings_in_window(
        &self,
        window: &TimeWindow,
    ) -> Result<Vec<BookingRecord>, DomainError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT
                b.id, b.service_id, b.user_id, b.created_at, b.total_amount, b.status,
                s.title AS service_title, s.price AS service_price, s.category AS service_category
            FROM bookings b
            LEFT JOIN services s ON s.id = b.service_id
            WHERE b.created_at >= $1 AND b.created_at < $2
            ORDER BY b.created_at ASC
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| database_error("bookings", "reading bookings in window", e))?;

        rows.into_iter().map(BookingRecord::try_from).collect()
    }

    async fn users_created_in_window(&self, window: &TimeWindow) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| database_error("users", "counting users in window", e))
    }
}
