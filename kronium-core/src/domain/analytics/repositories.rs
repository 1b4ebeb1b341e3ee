//! Analytics data source trait

use async_trait::async_trait;

use super::models::{BookingRecord, EntityTotals};
use super::window::TimeWindow;
use crate::domain::errors::DomainError;

/// Read side consumed by the analytics pipeline
#[async_trait]
pub trait IAnalyticsSource: Send + Sync {
    /// Row counts of users, services and bookings, ignoring any window
    async fn entity_totals(&self) -> Result<EntityTotals, DomainError>;

    /// Bookings created in `[window.start, window.end)`, joined with their service
    async fn bookings_in_window(&self, window: &TimeWindow)
    -> Result<Vec<BookingRecord>, DomainError>;

    /// Users created in `[window.start, window.end)`
    async fn users_created_in_window(&self, window: &TimeWindow) -> Result<i64, DomainError>;
}
