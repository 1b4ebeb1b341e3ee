//! Period-over-period growth

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Percentage change from `previous` to `current`; 0 when `previous` is 0
pub fn growth_percentage(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

pub fn count_growth(current: i64, previous: i64) -> f64 {
    growth_percentage(current as f64, previous as f64)
}

/// Revenue growth computed in decimal and converted at the end
pub fn revenue_growth(current: Decimal, previous: Decimal) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    ((current - previous) / previous * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_previous_reports_zero() {
        assert_eq!(count_growth(5, 0), 0.0);
        assert_eq!(count_growth(0, 0), 0.0);
        assert_eq!(revenue_growth(Decimal::from(900), Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_growth_and_decline() {
        assert_eq!(count_growth(15, 10), 50.0);
        assert_eq!(count_growth(5, 10), -50.0);
        assert_eq!(count_growth(0, 4), -100.0);
        assert_eq!(revenue_growth(Decimal::from(250), Decimal::from(200)), 25.0);
    }

    #[test]
    fn test_result_is_always_finite() {
        for (current, previous) in [(i64::MAX, 1), (0, 1), (1, i64::MAX)] {
            assert!(count_growth(current, previous).is_finite());
        }
    }
}
