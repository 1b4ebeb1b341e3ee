//! Fetch-and-aggregate pipeline behind the analytics screen

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error};

use super::aggregation::{category_distribution, monthly_buckets, top_services, total_revenue};
use super::growth::{count_growth, revenue_growth};
use crate::config::AnalyticsConfig;
use crate::domain::analytics::{
    AnalyticsReport, AnalyticsTotals, BookingRecord, EntityTotals, GrowthMetrics,
    IAnalyticsSource, TimeWindow,
};
use crate::domain::errors::DomainError;

/// Raw reads for one window and the window before it
#[derive(Debug, Clone)]
pub struct AnalyticsSnapshot {
    pub totals: EntityTotals,
    pub current: Vec<BookingRecord>,
    pub previous: Vec<BookingRecord>,
    pub current_users: i64,
    pub previous_users: i64,
}

/// Knobs that shape a report
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub top_services_limit: usize,
    pub compute_revenue_growth: bool,
}

impl From<&AnalyticsConfig> for ReportOptions {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            top_services_limit: config.top_services_limit,
            compute_revenue_growth: config.compute_revenue_growth,
        }
    }
}

pub struct AnalyticsService {
    source: Arc<dyn IAnalyticsSource>,
    options: ReportOptions,
}

impl AnalyticsService {
    pub fn new(source: Arc<dyn IAnalyticsSource>, options: ReportOptions) -> Self {
        Self { source, options }
    }

    /// Issue every read for `window` and its predecessor concurrently.
    ///
    /// Fails as a whole if any read fails; partial snapshots are never returned.
    pub async fn fetch(&self, window: &TimeWindow) -> Result<AnalyticsSnapshot, DomainError> {
        let previous = window.preceding();

        let (totals, current, previous_records, current_users, previous_users) = tokio::try_join!(
            self.source.entity_totals(),
            self.source.bookings_in_window(window),
            self.source.bookings_in_window(&previous),
            self.source.users_created_in_window(window),
            self.source.users_created_in_window(&previous),
        )
        .map_err(|e| {
            error!(
                window_start = %window.start,
                window_end = %window.end,
                error = %e,
                "Analytics fetch failed"
            );
            e
        })?;

        debug!(
            current_bookings = current.len(),
            previous_bookings = previous_records.len(),
            "Fetched analytics snapshot"
        );

        Ok(AnalyticsSnapshot {
            totals,
            current,
            previous: previous_records,
            current_users,
            previous_users,
        })
    }

    /// Fetch and aggregate in one call
    #[tracing::instrument(skip(self), fields(start = %window.start, end = %window.end))]
    pub async fn report(&self, window: TimeWindow) -> Result<AnalyticsReport, DomainError> {
        let snapshot = self.fetch(&window).await?;
        Ok(build_report(window, &snapshot, self.options, Utc::now()))
    }
}

/// Pure aggregation of a snapshot into a report
pub fn build_report(
    window: TimeWindow,
    snapshot: &AnalyticsSnapshot,
    options: ReportOptions,
    generated_at: DateTime<Utc>,
) -> AnalyticsReport {
    let revenue = total_revenue(&snapshot.current);

    let growth = GrowthMetrics {
        users: count_growth(snapshot.current_users, snapshot.previous_users),
        bookings: count_growth(snapshot.current.len() as i64, snapshot.previous.len() as i64),
        revenue: if options.compute_revenue_growth {
            revenue_growth(revenue, total_revenue(&snapshot.previous))
        } else {
            0.0
        },
    };

    AnalyticsReport {
        window,
        totals: AnalyticsTotals {
            users: snapshot.totals.users,
            services: snapshot.totals.services,
            bookings: snapshot.totals.bookings,
            revenue,
            window_bookings: snapshot.current.len() as u64,
            window_users: snapshot.current_users,
        },
        growth,
        monthly: monthly_buckets(&snapshot.current),
        categories: category_distribution(&snapshot.current),
        top_services: top_services(&snapshot.current, options.top_services_limit),
        generated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::ServiceSnapshot;
    use crate::domain::auth::UserId;
    use crate::domain::bookings::{BookingId, BookingStatus};
    use crate::domain::catalog::ServiceId;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    fn booking(created_at: DateTime<Utc>, amount: i64) -> BookingRecord {
        BookingRecord {
            booking_id: BookingId::generate(),
            service_id: ServiceId::generate(),
            customer_id: UserId::generate(),
            created_at,
            amount: Some(Decimal::from(amount)),
            status: BookingStatus::Confirmed,
            service: Some(ServiceSnapshot {
                title: "Borehole Drilling".to_string(),
                price: Decimal::from(amount),
                category: Some("Water".to_string()),
            }),
        }
    }

    fn window() -> TimeWindow {
        let end = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
        TimeWindow::trailing_days(end, 30).unwrap()
    }

    fn options(compute_revenue_growth: bool) -> ReportOptions {
        ReportOptions {
            top_services_limit: 5,
            compute_revenue_growth,
        }
    }

    #[test]
    fn test_build_report_growth() {
        let w = window();
        let snapshot = AnalyticsSnapshot {
            totals: EntityTotals {
                users: 40,
                services: 8,
                bookings: 120,
            },
            current: vec![
                booking(w.start + Duration::days(1), 300),
                booking(w.start + Duration::days(2), 200),
            ],
            previous: vec![booking(w.start - Duration::days(3), 250)],
            current_users: 6,
            previous_users: 4,
        };

        let report = build_report(w, &snapshot, options(true), w.end);

        assert_eq!(report.totals.users, 40);
        assert_eq!(report.totals.bookings, 120);
        assert_eq!(report.totals.window_bookings, 2);
        assert_eq!(report.totals.revenue, Decimal::from(500));
        assert_eq!(report.growth.users, 50.0);
        assert_eq!(report.growth.bookings, 100.0);
        assert_eq!(report.growth.revenue, 100.0);
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.top_services.len(), 2);
    }

    #[test]
    fn test_revenue_growth_can_be_disabled() {
        let w = window();
        let snapshot = AnalyticsSnapshot {
            totals: EntityTotals::default(),
            current: vec![booking(w.start, 300)],
            previous: vec![booking(w.start - Duration::days(1), 100)],
            current_users: 0,
            previous_users: 0,
        };

        let report = build_report(w, &snapshot, options(false), w.end);
        assert_eq!(report.growth.revenue, 0.0);
        assert_eq!(report.growth.users, 0.0);
    }

    #[test]
    fn test_empty_previous_window_reports_zero_growth() {
        let w = window();
        let snapshot = AnalyticsSnapshot {
            totals: EntityTotals::default(),
            current: vec![booking(w.start, 10)],
            previous: Vec::new(),
            current_users: 3,
            previous_users: 0,
        };

        let report = build_report(w, &snapshot, options(true), w.end);
        assert_eq!(report.growth, GrowthMetrics::default());
    }
}
