use chrono::{Datelike, Days, NaiveDate, Weekday};
use nse_expiry_service::expiry::{ExpiryError, ExpiryResolver, ExpiryType, HolidaySet};

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn every_day_of_2024() -> impl Iterator<Item = NaiveDate> {
        let start = date(2024, 1, 1);
        (0..366u64).map(move |offset| start + Days::new(offset))
    }

    #[test]
    fn test_monthly_expiry_properties_over_2024() {
        let resolver = ExpiryResolver::new(HolidaySet::nse_2024());

        for day in every_day_of_2024() {
            let result = resolver.monthly_expiry(day).unwrap();

            assert!(!resolver.is_holiday(&result.expiry_date), "{} resolved to a holiday", day);
            assert!(result.days_to_expiry >= 0);
            assert_eq!(result.expiry_type, ExpiryType::Monthly);
            assert!(!result.is_weekly);

            // no 2024 last-Thursday is a holiday, so the month never changes
            assert_eq!(result.expiry_date.weekday(), Weekday::Thu);
            assert_eq!(
                (result.expiry_date.year(), result.expiry_date.month()),
                (day.year(), day.month())
            );
        }
    }

    #[test]
    fn test_weekly_expiry_properties_over_2024() {
        let resolver = ExpiryResolver::new(HolidaySet::nse_2024());

        for day in every_day_of_2024() {
            let result = resolver.weekly_expiry(day).unwrap();

            assert!(!resolver.is_holiday(&result.expiry_date), "{} resolved to a holiday", day);
            assert!(result.expiry_date >= day);
            assert!(result.expiry_date <= day + Days::new(7));
            assert!((0..=7).contains(&result.days_to_expiry));
            assert!(result.is_weekly);
        }
    }

    #[test]
    fn test_weekly_expiry_is_thursday_unless_rolled_back() {
        let resolver = ExpiryResolver::new(HolidaySet::nse_2024());

        for day in every_day_of_2024() {
            let result = resolver.weekly_expiry(day).unwrap();
            if result.expiry_date.weekday() != Weekday::Thu {
                let thursday = result.expiry_date.succ_opt().unwrap();
                assert!(resolver.is_holiday(&thursday), "{} rolled back without a holiday", day);
            }
        }
    }

    #[test]
    fn test_results_are_idempotent() {
        let resolver = ExpiryResolver::new(HolidaySet::nse_2024());

        for input in ["2024-01-15", "2024-04-08", "2024-08-29", "2024-12-31"] {
            assert_eq!(
                resolver.monthly_expiry_str(input).unwrap(),
                resolver.monthly_expiry_str(input).unwrap()
            );
            assert_eq!(
                resolver.weekly_expiry_str(input).unwrap(),
                resolver.weekly_expiry_str(input).unwrap()
            );
        }
    }

    #[test]
    fn test_documented_scenarios() {
        let resolver = ExpiryResolver::new(HolidaySet::nse_2024());

        let monthly = resolver.monthly_expiry_str("2024-01-15").unwrap();
        assert_eq!(monthly.expiry_date, date(2024, 1, 25));
        assert_eq!(monthly.days_to_expiry, 10);

        let weekly = resolver.weekly_expiry_str("2024-01-15").unwrap();
        assert_eq!(weekly.expiry_date, date(2024, 1, 18));
        assert_eq!(weekly.days_to_expiry, 3);

        let expiry_day = resolver.monthly_expiry_str("2024-08-29").unwrap();
        assert_eq!(expiry_day.expiry_date, date(2024, 8, 29));
        assert_eq!(expiry_day.days_to_expiry, 0);

        assert_eq!(
            resolver.monthly_expiry_str("2024-13-01"),
            Err(ExpiryError::InvalidDateFormat("2024-13-01".to_string()))
        );
    }

    #[test]
    fn test_eid_thursday_weekly_roll_back() {
        // 2024-04-11 (Eid-ul-Fitr) is a Thursday
        let resolver = ExpiryResolver::new(HolidaySet::nse_2024());
        let result = resolver.weekly_expiry_str("2024-04-08").unwrap();
        assert_eq!(result.expiry_date, date(2024, 4, 10));
        assert_eq!(result.days_to_expiry, 2);
    }

    #[test]
    fn test_leading_holiday_run_moves_to_next_month() {
        // last Thursday of March 2024 is the 28th; close 1st..28th
        let closed = (1..=28).map(|d| (date(2024, 3, d), "Closed"));
        let resolver = ExpiryResolver::new(HolidaySet::new(closed));

        let result = resolver.monthly_expiry(date(2024, 3, 4)).unwrap();
        assert_eq!(result.expiry_date, date(2024, 4, 25));
        assert_eq!(result.days_to_expiry, 52);
    }

    #[test]
    fn test_empty_holiday_set() {
        let resolver = ExpiryResolver::new(HolidaySet::default());
        let result = resolver.weekly_expiry_str("2024-08-12").unwrap();
        assert_eq!(result.expiry_date, date(2024, 8, 15));
    }
}
