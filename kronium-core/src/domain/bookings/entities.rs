//! Booking entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::value_objects::{BookingId, BookingStatus};
use crate::domain::auth::UserId;
use crate::domain::catalog::ServiceId;

/// A row of the `bookings` table
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub notes: Option<String>,
    /// Amount charged; absent until invoiced
    pub total_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer projection joined onto a booking
#[derive(Debug, Clone, PartialEq)]
pub struct BookingCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Service projection joined onto a booking
#[derive(Debug, Clone, PartialEq)]
pub struct BookingService {
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub location: Option<String>,
}

/// A booking with the customer and service it references.
///
/// Either side may be missing when the referenced row was deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub booking: Booking,
    pub customer: Option<BookingCustomer>,
    pub service: Option<BookingService>,
}

impl BookingDetails {
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map_or("Unknown", |c| c.name.as_str())
    }

    pub fn service_title(&self) -> &str {
        self.service.as_ref().map_or("Unknown Service", |s| s.title.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.service.as_ref().and_then(|s| s.location.as_deref())
    }
}

/// Filter applied to the booking list
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    /// Matched case-insensitively against customer name and email, service title and location
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
}

impl BookingQuery {
    pub fn matches(&self, details: &BookingDetails) -> bool {
        if let Some(status) = self.status
            && details.booking.status != status
        {
            return false;
        }

        let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return true;
        };
        let term = term.to_lowercase();

        let customer_match = details.customer.as_ref().is_some_and(|c| {
            c.name.to_lowercase().contains(&term) || c.email.to_lowercase().contains(&term)
        });

        customer_match
            || details.service_title().to_lowercase().contains(&term)
            || details
                .location()
                .is_some_and(|l| l.to_lowercase().contains(&term))
    }
}

/// Per-status tallies shown above the booking list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingStatusCounts {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl BookingStatusCounts {
    pub fn tally<'a>(bookings: impl IntoIterator<Item = &'a BookingDetails>) -> Self {
        bookings
            .into_iter()
            .fold(Self::default(), |mut counts, details| {
                counts.total += 1;
                match details.booking.status {
                    BookingStatus::Pending => counts.pending += 1,
                    BookingStatus::Confirmed => counts.confirmed += 1,
                    BookingStatus::InProgress => counts.in_progress += 1,
                    BookingStatus::Completed => counts.completed += 1,
                    BookingStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(status: BookingStatus, customer: &str, location: Option<&str>) -> BookingDetails {
        let now = Utc::now();
        BookingDetails {
            booking: Booking {
                booking_id: BookingId::generate(),
                user_id: UserId::generate(),
                service_id: ServiceId::generate(),
                status,
                booking_date: now,
                notes: None,
                total_amount: None,
                created_at: now,
                updated_at: now,
            },
            customer: Some(BookingCustomer {
                name: customer.to_string(),
                email: format!("{}@kronium.example", customer.to_lowercase()),
                phone: "0700".to_string(),
            }),
            service: Some(BookingService {
                title: "Borehole Drilling".to_string(),
                price: Decimal::new(500, 0),
                category: "Water".to_string(),
                location: location.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_search_covers_customer_service_and_location() {
        let booking = details(BookingStatus::Pending, "Wanjiru", Some("Kisumu"));
        for term in ["wanj", "WANJIRU@", "borehole", "kisumu"] {
            let query = BookingQuery {
                search: Some(term.to_string()),
                status: None,
            };
            assert!(query.matches(&booking), "term {term} should match");
        }

        let query = BookingQuery {
            search: Some("mombasa".to_string()),
            status: None,
        };
        assert!(!query.matches(&booking));
    }

    #[test]
    fn test_status_filter() {
        let booking = details(BookingStatus::Confirmed, "Otieno", None);
        let query = BookingQuery {
            search: None,
            status: Some(BookingStatus::Pending),
        };
        assert!(!query.matches(&booking));
    }

    #[test]
    fn test_missing_joins_use_placeholders() {
        let mut booking = details(BookingStatus::Pending, "Otieno", None);
        booking.customer = None;
        booking.service = None;
        assert_eq!(booking.customer_name(), "Unknown");
        assert_eq!(booking.service_title(), "Unknown Service");
        assert!(
            !BookingQuery {
                search: Some("otieno".to_string()),
                status: None
            }
            .matches(&booking)
        );
    }

    #[test]
    fn test_status_counts() {
        let bookings = vec![
            details(BookingStatus::Pending, "A", None),
            details(BookingStatus::Pending, "B", None),
            details(BookingStatus::InProgress, "C", None),
            details(BookingStatus::Cancelled, "D", None),
        ];
        let counts = BookingStatusCounts::tally(&bookings);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(counts.confirmed + counts.completed, 0);
    }
}
