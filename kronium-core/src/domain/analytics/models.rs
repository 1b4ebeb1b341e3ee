//! Analytics models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::window::{TimeWindow, month_label};
use crate::domain::auth::UserId;
use crate::domain::bookings::{BookingId, BookingStatus};
use crate::domain::catalog::ServiceId;

/// Label used when a booking's service (or its category) is missing
pub const UNKNOWN_CATEGORY: &str = "Unknown";
/// Title used when a booking's service is missing
pub const UNKNOWN_SERVICE: &str = "Unknown Service";

/// Service projection joined onto a booking record
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSnapshot {
    pub title: String,
    pub price: Decimal,
    pub category: Option<String>,
}

/// A booking as seen by the analytics pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub booking_id: BookingId,
    pub service_id: ServiceId,
    pub customer_id: UserId,
    pub created_at: DateTime<Utc>,
    pub amount: Option<Decimal>,
    pub status: BookingStatus,
    /// `None` when the join found no service row
    pub service: Option<ServiceSnapshot>,
}

impl BookingRecord {
    /// Revenue credited to this booking: the charged amount, else the
    /// service's list price, else zero. Never negative.
    pub fn attributed_revenue(&self) -> Decimal {
        self.amount
            .or_else(|| self.service.as_ref().map(|s| s.price))
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    }

    /// Category label, falling back to [`UNKNOWN_CATEGORY`]
    pub fn category(&self) -> &str {
        self.service
            .as_ref()
            .and_then(|s| s.category.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn service_title(&self) -> &str {
        self.service
            .as_ref()
            .map(|s| s.title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_SERVICE)
    }
}

/// Unfiltered row counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityTotals {
    pub users: i64,
    pub services: i64,
    pub bookings: i64,
}

/// Bookings created in one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBucket {
    /// First day of the month
    pub month: NaiveDate,
    pub count: u64,
}

impl MonthlyBucket {
    pub fn label(&self) -> String {
        month_label(self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Booking volume and revenue for one service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRanking {
    pub service_id: ServiceId,
    /// Title of the first record seen for this service
    pub title: String,
    pub bookings: u64,
    pub revenue: Decimal,
}

impl ServiceRanking {
    /// `None` for an empty group
    pub fn average_revenue(&self) -> Option<Decimal> {
        (self.bookings > 0).then(|| self.revenue / Decimal::from(self.bookings))
    }
}

/// Percentage change against the preceding window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthMetrics {
    pub users: f64,
    pub bookings: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalyticsTotals {
    pub users: i64,
    pub services: i64,
    pub bookings: i64,
    /// Attributed revenue of bookings inside the window
    pub revenue: Decimal,
    /// Bookings inside the window
    pub window_bookings: u64,
    /// Users created inside the window
    pub window_users: i64,
}

/// Everything the analytics screen shows for one window
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub window: TimeWindow,
    pub totals: AnalyticsTotals,
    pub growth: GrowthMetrics,
    pub monthly: Vec<MonthlyBucket>,
    /// Full distribution, largest first
    pub categories: Vec<CategoryCount>,
    pub top_services: Vec<ServiceRanking>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: Option<i64>, service: Option<ServiceSnapshot>) -> BookingRecord {
        BookingRecord {
            booking_id: BookingId::generate(),
            service_id: ServiceId::generate(),
            customer_id: UserId::generate(),
            created_at: Utc::now(),
            amount: amount.map(Decimal::from),
            status: BookingStatus::Pending,
            service,
        }
    }

    fn snapshot(price: i64, category: Option<&str>) -> ServiceSnapshot {
        ServiceSnapshot {
            title: "Solar Panel Installation".to_string(),
            price: Decimal::from(price),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_attributed_revenue_fallbacks() {
        assert_eq!(
            record(Some(150), Some(snapshot(100, None))).attributed_revenue(),
            Decimal::from(150)
        );
        assert_eq!(
            record(None, Some(snapshot(100, None))).attributed_revenue(),
            Decimal::from(100)
        );
        assert_eq!(record(None, None).attributed_revenue(), Decimal::ZERO);
        assert_eq!(record(Some(-20), None).attributed_revenue(), Decimal::ZERO);
    }

    #[test]
    fn test_category_fallback() {
        assert_eq!(record(None, None).category(), UNKNOWN_CATEGORY);
        assert_eq!(
            record(None, Some(snapshot(1, Some("  ")))).category(),
            UNKNOWN_CATEGORY
        );
        assert_eq!(
            record(None, Some(snapshot(1, Some("Energy")))).category(),
            "Energy"
        );
        assert_eq!(record(None, None).service_title(), UNKNOWN_SERVICE);
    }

    #[test]
    fn test_average_revenue_guard() {
        let mut ranking = ServiceRanking {
            service_id: ServiceId::generate(),
            title: "A".to_string(),
            bookings: 2,
            revenue: Decimal::from(250),
        };
        assert_eq!(ranking.average_revenue(), Some(Decimal::from(125)));

        ranking.bookings = 0;
        assert_eq!(ranking.average_revenue(), None);
    }
}
