use chrono::NaiveDate;

use crate::error::AppError;

/// Nights between two dates, ignoring order.
///
/// A reversed range still yields a positive count; the booking is stored with
/// the dates exactly as entered.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().abs()
}

/// Total frozen into a venue booking at creation time.
///
/// A product that does not fit in an `i64` is refused rather than capped.
pub fn venue_total(price: i64, nights: i64) -> Result<i64, AppError> {
    price.checked_mul(nights).ok_or_else(too_large)
}

pub fn service_total(price: i64, guests: i32) -> Result<i64, AppError> {
    price.checked_mul(i64::from(guests)).ok_or_else(too_large)
}

fn too_large() -> AppError {
    AppError::Validation("total amount is too large".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_two_night_stay() {
        let nights = nights_between(date("2024-06-01"), date("2024-06-03"));
        assert_eq!(nights, 2);
        assert_eq!(venue_total(5_000_000, nights).unwrap(), 10_000_000);
    }

    #[test]
    fn test_reversed_range_counts_absolute_nights() {
        assert_eq!(nights_between(date("2024-06-03"), date("2024-06-01")), 2);
    }

    #[test]
    fn test_same_day_is_zero_nights() {
        let nights = nights_between(date("2024-06-01"), date("2024-06-01"));
        assert_eq!(nights, 0);
        assert_eq!(venue_total(5_000_000, nights).unwrap(), 0);
    }

    #[test]
    fn test_month_and_leap_boundaries() {
        assert_eq!(nights_between(date("2024-02-28"), date("2024-03-01")), 2);
        assert_eq!(nights_between(date("2023-12-31"), date("2024-01-01")), 1);
    }

    #[test]
    fn test_service_total_scales_with_guests() {
        assert_eq!(service_total(350_000, 3).unwrap(), 1_050_000);
    }

    #[test]
    fn test_overflowing_total_is_refused() {
        assert!(matches!(venue_total(4_000_000_000_000_000_000, 3), Err(AppError::Validation(_))));
        assert!(matches!(service_total(i64::MAX / 2, 3), Err(AppError::Validation(_))));
        assert_eq!(venue_total(i64::MAX, 1).unwrap(), i64::MAX);
    }
}
