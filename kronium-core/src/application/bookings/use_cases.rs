//! Booking management use cases

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::bookings::{
    BookingDetails, BookingId, BookingQuery, BookingStatus, BookingStatusCounts,
    IBookingRepository,
};
use crate::domain::errors::DomainError;

/// Filtered bookings plus tallies over the unfiltered set
#[derive(Debug, Clone)]
pub struct BookingList {
    pub bookings: Vec<BookingDetails>,
    pub counts: BookingStatusCounts,
}

pub struct ListBookingsUseCase {
    booking_repository: Arc<dyn IBookingRepository>,
}

impl ListBookingsUseCase {
    pub fn new(booking_repository: Arc<dyn IBookingRepository>) -> Self {
        Self { booking_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, query: BookingQuery) -> Result<BookingList, ApplicationError> {
        let all = self.booking_repository.list().await?;
        let counts = BookingStatusCounts::tally(&all);
        let bookings = all.into_iter().filter(|b| query.matches(b)).collect();

        Ok(BookingList { bookings, counts })
    }
}

pub struct GetBookingUseCase {
    booking_repository: Arc<dyn IBookingRepository>,
}

impl GetBookingUseCase {
    pub fn new(booking_repository: Arc<dyn IBookingRepository>) -> Self {
        Self { booking_repository }
    }

    pub async fn execute(&self, booking_id: BookingId) -> Result<BookingDetails, ApplicationError> {
        find_booking(self.booking_repository.as_ref(), booking_id).await
    }
}

/// Advance a booking along its lifecycle
pub struct UpdateBookingStatusUseCase {
    booking_repository: Arc<dyn IBookingRepository>,
}

impl UpdateBookingStatusUseCase {
    pub fn new(booking_repository: Arc<dyn IBookingRepository>) -> Self {
        Self { booking_repository }
    }

    #[tracing::instrument(skip(self), fields(booking_id = %booking_id, to = %next))]
    pub async fn execute(
        &self,
        booking_id: BookingId,
        next: BookingStatus,
    ) -> Result<BookingDetails, ApplicationError> {
        let mut details = find_booking(self.booking_repository.as_ref(), booking_id).await?;
        let current = details.booking.status;

        if !current.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                entity: "booking",
                from: current.to_string(),
                to: next.to_string(),
            }
            .into());
        }

        let applied = self
            .booking_repository
            .update_status(&booking_id, current, next)
            .await?;
        if !applied {
            // Someone else moved the booking since it was read
            return Err(DomainError::conflict(format!(
                "booking {} is no longer '{}'",
                booking_id, current
            ))
            .into());
        }

        tracing::info!(from = %current, "Booking status updated");

        details.booking.status = next;
        details.booking.updated_at = chrono::Utc::now();
        Ok(details)
    }
}

async fn find_booking(
    repository: &dyn IBookingRepository,
    booking_id: BookingId,
) -> Result<BookingDetails, ApplicationError> {
    repository
        .find_by_id(&booking_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Booking", booking_id).into())
}
