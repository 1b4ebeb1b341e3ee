//! Single-pass summaries over fetched booking records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::domain::analytics::{
    BookingRecord, CategoryCount, MonthlyBucket, ServiceRanking, month_start,
};
use crate::domain::catalog::ServiceId;

/// Bookings per calendar month, oldest month first
pub fn monthly_buckets(records: &[BookingRecord]) -> Vec<MonthlyBucket> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(month_start(record.created_at)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(month, count)| MonthlyBucket { month, count })
        .collect()
}

/// Bookings per service category, largest first; ties by label
pub fn category_distribution(records: &[BookingRecord]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *counts.entry(record.category()).or_default() += 1;
    }

    let mut distribution: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    distribution
}

/// Every service's booking count and revenue, most booked first.
///
/// Ties keep the order in which services were first seen.
pub fn rank_services(records: &[BookingRecord]) -> Vec<ServiceRanking> {
    let mut index: HashMap<ServiceId, usize> = HashMap::new();
    let mut rankings: Vec<ServiceRanking> = Vec::new();

    for record in records {
        let slot = *index.entry(record.service_id).or_insert_with(|| {
            rankings.push(ServiceRanking {
                service_id: record.service_id,
                title: record.service_title().to_string(),
                bookings: 0,
                revenue: Decimal::ZERO,
            });
            rankings.len() - 1
        });

        let ranking = &mut rankings[slot];
        ranking.bookings += 1;
        ranking.revenue += record.attributed_revenue();
    }

    // Stable sort preserves first-seen order among equal counts
    rankings.sort_by(|a, b| b.bookings.cmp(&a.bookings));
    rankings
}

/// The `limit` most booked services
pub fn top_services(records: &[BookingRecord], limit: usize) -> Vec<ServiceRanking> {
    let mut rankings = rank_services(records);
    rankings.truncate(limit);
    rankings
}

/// Sum of attributed revenue
pub fn total_revenue(records: &[BookingRecord]) -> Decimal {
    records.iter().map(BookingRecord::attributed_revenue).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::ServiceSnapshot;
    use crate::domain::auth::UserId;
    use crate::domain::bookings::{BookingId, BookingStatus};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn service_a() -> ServiceId {
        ServiceId::new(Uuid::from_u128(0xA))
    }

    fn service_b() -> ServiceId {
        ServiceId::new(Uuid::from_u128(0xB))
    }

    fn record(
        (y, m, d): (i32, u32, u32),
        service_id: ServiceId,
        title: &str,
        category: &str,
        amount: Option<i64>,
        price: i64,
    ) -> BookingRecord {
        BookingRecord {
            booking_id: BookingId::generate(),
            service_id,
            customer_id: UserId::generate(),
            created_at: Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
            amount: amount.map(Decimal::from),
            status: BookingStatus::Completed,
            service: Some(ServiceSnapshot {
                title: title.to_string(),
                price: Decimal::from(price),
                category: Some(category.to_string()),
            }),
        }
    }

    /// Three bookings spanning a year boundary
    fn sample() -> Vec<BookingRecord> {
        vec![
            record((2024, 11, 5), service_a(), "A", "Energy", None, 100),
            record((2024, 12, 20), service_a(), "A", "Energy", Some(150), 100),
            record((2025, 1, 2), service_b(), "B", "Water", Some(200), 200),
        ]
    }

    #[test]
    fn test_monthly_buckets_cross_year_boundary() {
        let buckets = monthly_buckets(&sample());
        let labels: Vec<(String, u64)> = buckets.iter().map(|b| (b.label(), b.count)).collect();
        assert_eq!(
            labels,
            vec![
                ("Nov 2024".to_string(), 1),
                ("Dec 2024".to_string(), 1),
                ("Jan 2025".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_monthly_buckets_order_is_independent_of_input_order() {
        let mut records = sample();
        records.reverse();
        let months: Vec<_> = monthly_buckets(&records).iter().map(|b| b.month).collect();
        let mut sorted = months.clone();
        sorted.sort();
        assert_eq!(months, sorted);
    }

    #[test]
    fn test_category_distribution() {
        let distribution = category_distribution(&sample());
        assert_eq!(
            distribution,
            vec![
                CategoryCount {
                    category: "Energy".to_string(),
                    count: 2
                },
                CategoryCount {
                    category: "Water".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_missing_service_counts_as_unknown() {
        let mut records = sample();
        records[2].service = None;
        let distribution = category_distribution(&records);
        assert!(
            distribution
                .iter()
                .any(|c| c.category == "Unknown" && c.count == 1)
        );
    }

    #[test]
    fn test_top_services() {
        let top = top_services(&sample(), 5);
        assert_eq!(top.len(), 2);

        assert_eq!(top[0].title, "A");
        assert_eq!(top[0].bookings, 2);
        assert_eq!(top[0].revenue, Decimal::from(250));

        assert_eq!(top[1].title, "B");
        assert_eq!(top[1].bookings, 1);
        assert_eq!(top[1].revenue, Decimal::from(200));
    }

    #[test]
    fn test_top_services_keeps_first_title_and_truncates() {
        let mut records = sample();
        records.push(record((2025, 1, 3), service_a(), "A renamed", "Energy", Some(10), 100));
        for n in 0..6u128 {
            records.push(record(
                (2025, 1, 4),
                ServiceId::new(Uuid::from_u128(0x100 + n)),
                "Other",
                "Misc",
                None,
                1,
            ));
        }

        let top = top_services(&records, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].service_id, service_a());
        assert_eq!(top[0].title, "A");
        assert_eq!(top[0].bookings, 3);
    }

    #[test]
    fn test_total_revenue_matches_rankings() {
        let records = sample();
        let ranked: Decimal = rank_services(&records).iter().map(|r| r.revenue).sum();
        assert_eq!(total_revenue(&records), Decimal::from(450));
        assert_eq!(ranked, total_revenue(&records));
    }

    #[test]
    fn test_empty_input() {
        assert!(monthly_buckets(&[]).is_empty());
        assert!(category_distribution(&[]).is_empty());
        assert!(top_services(&[], 5).is_empty());
        assert_eq!(total_revenue(&[]), Decimal::ZERO);
    }
}
