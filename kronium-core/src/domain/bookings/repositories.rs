//! Booking repository trait

use async_trait::async_trait;

use super::entities::BookingDetails;
use super::value_objects::{BookingId, BookingStatus};
use crate::domain::errors::DomainError;

#[async_trait]
pub trait IBookingRepository: Send + Sync {
    /// All bookings joined with customer and service, newest first
    async fn list(&self) -> Result<Vec<BookingDetails>, DomainError>;

    async fn find_by_id(&self, booking_id: &BookingId)
    -> Result<Option<BookingDetails>, DomainError>;

    /// Move a booking from `from` to `to`.
    ///
    /// Only applies when the stored status still equals `from`; returns
    /// `false` when no row matched.
    async fn update_status(
        &self,
        booking_id: &BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, DomainError>;

    /// The `limit` most recently created bookings
    async fn recent(&self, limit: i64) -> Result<Vec<BookingDetails>, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;
}
