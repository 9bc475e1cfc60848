use super::config;
use super::error::ExpiryError;
use super::holidays::HolidaySet;
use super::models::{ExpiryQuery, ExpiryResolution, ExpiryResult, ExpiryType};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::debug;

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_reference_date(date_str: &str) -> Result<NaiveDate, ExpiryError> {
    NaiveDate::parse_from_str(date_str, config::DATE_FORMAT)
        .map_err(|_| ExpiryError::InvalidDateFormat(date_str.to_string()))
}

/// Last Thursday of the given month
pub fn last_thursday(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = next_month(year, month);
    let mut day = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;

    while day.weekday() != Weekday::Thu {
        day = day.pred_opt()?;
    }

    Some(day)
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// Resolves monthly and weekly derivatives expiries against a holiday table
#[derive(Debug, Clone, Default)]
pub struct ExpiryResolver {
    holidays: HolidaySet,
}

impl ExpiryResolver {
    pub fn new(holidays: HolidaySet) -> Self {
        Self { holidays }
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    pub fn is_holiday(&self, date: &NaiveDate) -> bool {
        self.holidays.contains(date)
    }

    /// Step back one day at a time until the date is not a holiday
    pub fn adjust_for_holiday(&self, date: NaiveDate) -> Result<NaiveDate, ExpiryError> {
        let mut current = date;
        while self.is_holiday(&current) {
            current = current.pred_opt().ok_or_else(|| {
                ExpiryError::InternalError(format!("holiday roll-back underflowed from {}", date))
            })?;
        }
        Ok(current)
    }

    /// Last Thursday of the reference month, rolled back over holidays.
    ///
    /// When the roll-back leaves the month, the next month is tried instead,
    /// at most `MAX_MONTH_ADVANCES` times.
    pub fn monthly_expiry(&self, reference: NaiveDate) -> Result<ExpiryResult, ExpiryError> {
        let (mut year, mut month) = (reference.year(), reference.month());

        for _ in 0..=config::MAX_MONTH_ADVANCES {
            let candidate = last_thursday(year, month).ok_or_else(|| {
                ExpiryError::InternalError(format!("no last Thursday for {}-{:02}", year, month))
            })?;
            let adjusted = self.adjust_for_holiday(candidate)?;

            if (adjusted.year(), adjusted.month()) == (year, month) {
                return Ok(ExpiryResult::new(reference, adjusted, ExpiryType::Monthly));
            }

            debug!(
                %candidate,
                %adjusted,
                "monthly expiry rolled out of {}-{:02}, retargeting next month",
                year,
                month
            );
            (year, month) = next_month(year, month);
        }

        Err(ExpiryError::InternalError(format!(
            "no monthly expiry found within {} months of {}",
            config::MAX_MONTH_ADVANCES,
            reference
        )))
    }

    /// Next Thursday strictly after the reference date, rolled back over holidays
    pub fn weekly_expiry(&self, reference: NaiveDate) -> Result<ExpiryResult, ExpiryError> {
        let weekday = reference.weekday().num_days_from_monday() as i64;
        let thursday = Weekday::Thu.num_days_from_monday() as i64;

        let mut days_ahead = thursday - weekday;
        if days_ahead <= 0 {
            days_ahead += 7;
        }

        let candidate = reference
            .checked_add_days(Days::new(days_ahead as u64))
            .ok_or_else(|| ExpiryError::InternalError(format!("date overflow after {}", reference)))?;
        let adjusted = self.adjust_for_holiday(candidate)?;

        Ok(ExpiryResult::new(reference, adjusted, ExpiryType::Weekly))
    }

    pub fn monthly_expiry_str(&self, date_str: &str) -> Result<ExpiryResult, ExpiryError> {
        self.monthly_expiry(parse_reference_date(date_str)?)
    }

    pub fn weekly_expiry_str(&self, date_str: &str) -> Result<ExpiryResult, ExpiryError> {
        self.weekly_expiry(parse_reference_date(date_str)?)
    }

    /// Resolve every expiry the query's kind asks for
    pub fn resolve(&self, query: &ExpiryQuery) -> Result<ExpiryResolution, ExpiryError> {
        let monthly_expiry = if query.kind.includes_monthly() {
            Some(self.monthly_expiry(query.reference_date)?)
        } else {
            None
        };

        let weekly_expiry = if query.kind.includes_weekly() {
            Some(self.weekly_expiry(query.reference_date)?)
        } else {
            None
        };

        Ok(ExpiryResolution {
            index: query.index.clone(),
            for_date: query.for_date.clone(),
            timestamp: None,
            request_method: None,
            monthly_expiry,
            weekly_expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::models::ExpiryKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn nse() -> ExpiryResolver {
        ExpiryResolver::new(HolidaySet::nse_2024())
    }

    #[test]
    fn test_last_thursday() {
        assert_eq!(last_thursday(2024, 1), Some(date(2024, 1, 25)));
        assert_eq!(last_thursday(2024, 2), Some(date(2024, 2, 29)));
        assert_eq!(last_thursday(2024, 10), Some(date(2024, 10, 31)));
        assert_eq!(last_thursday(2024, 12), Some(date(2024, 12, 26)));
    }

    #[test]
    fn test_parse_reference_date_rejects_impossible_dates() {
        assert!(parse_reference_date("2024-13-01").is_err());
        assert!(parse_reference_date("2024-01-32").is_err());
        assert!(parse_reference_date("2023-02-29").is_err());
        assert!(parse_reference_date("15-01-2024").is_err());
        assert!(parse_reference_date("").is_err());
        assert_eq!(parse_reference_date("2024-02-29").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_monthly_expiry_mid_month() {
        let result = nse().monthly_expiry_str("2024-01-15").unwrap();
        assert_eq!(result.expiry_date, date(2024, 1, 25));
        assert_eq!(result.days_to_expiry, 10);
        assert!(!result.is_weekly);
        assert_eq!(result.expiry_type, ExpiryType::Monthly);
    }

    #[test]
    fn test_monthly_expiry_on_expiry_day() {
        let result = nse().monthly_expiry_str("2024-08-29").unwrap();
        assert_eq!(result.expiry_date, date(2024, 8, 29));
        assert_eq!(result.days_to_expiry, 0);
    }

    #[test]
    fn test_monthly_expiry_after_expiry_day_stays_in_month() {
        let result = nse().monthly_expiry_str("2024-01-30").unwrap();
        assert_eq!(result.expiry_date, date(2024, 1, 25));
        assert_eq!(result.days_to_expiry, 0);
    }

    #[test]
    fn test_monthly_expiry_rolls_back_over_holiday() {
        let resolver = ExpiryResolver::new(HolidaySet::new([(date(2024, 1, 25), "Synthetic")]));
        let result = resolver.monthly_expiry(date(2024, 1, 2)).unwrap();
        assert_eq!(result.expiry_date, date(2024, 1, 24));
        assert_eq!(result.days_to_expiry, 22);
    }

    #[test]
    fn test_monthly_expiry_retargets_next_month() {
        // every day of February 2024 is a holiday
        let february = (1..=29).map(|d| (date(2024, 2, d), "Closed"));
        let resolver = ExpiryResolver::new(HolidaySet::new(february));

        let result = resolver.monthly_expiry(date(2024, 2, 10)).unwrap();
        assert_eq!(result.expiry_date, date(2024, 3, 28));
        assert_eq!(result.days_to_expiry, 47);
    }

    #[test]
    fn test_monthly_expiry_retargets_across_year_end() {
        let december = (1..=31).map(|d| (date(2024, 12, d), "Closed"));
        let resolver = ExpiryResolver::new(HolidaySet::new(december));

        let result = resolver.monthly_expiry(date(2024, 12, 5)).unwrap();
        assert_eq!(result.expiry_date, date(2025, 1, 30));
    }

    #[test]
    fn test_monthly_expiry_fully_blocked_calendar_fails() {
        let start = date(2024, 1, 1);
        let closed = (0..800u64).map(|offset| (start + Days::new(offset), "Closed"));
        let resolver = ExpiryResolver::new(HolidaySet::new(closed));

        let err = resolver.monthly_expiry(date(2024, 3, 1)).unwrap_err();
        assert!(matches!(err, ExpiryError::InternalError(_)));
    }

    #[test]
    fn test_weekly_expiry_from_monday() {
        let result = nse().weekly_expiry_str("2024-01-15").unwrap();
        assert_eq!(result.expiry_date, date(2024, 1, 18));
        assert_eq!(result.days_to_expiry, 3);
        assert!(result.is_weekly);
        assert_eq!(result.expiry_type, ExpiryType::Weekly);
    }

    #[test]
    fn test_weekly_expiry_on_thursday_rolls_to_next_week() {
        let result = nse().weekly_expiry_str("2024-01-18").unwrap();
        assert_eq!(result.expiry_date, date(2024, 1, 25));
        assert_eq!(result.days_to_expiry, 7);
    }

    #[test]
    fn test_weekly_expiry_from_weekend() {
        let result = nse().weekly_expiry_str("2024-01-20").unwrap();
        assert_eq!(result.expiry_date, date(2024, 1, 25));
        assert_eq!(result.days_to_expiry, 5);
    }

    #[test]
    fn test_weekly_expiry_holiday_thursday() {
        // 2024-08-15 (Independence Day) is a Thursday
        let result = nse().weekly_expiry_str("2024-08-12").unwrap();
        assert_eq!(result.expiry_date, date(2024, 8, 14));
        assert_eq!(result.days_to_expiry, 2);
    }

    #[test]
    fn test_weekly_expiry_keeps_previous_month_after_roll_back() {
        let resolver = ExpiryResolver::new(HolidaySet::new([
            (date(2024, 5, 2), "Synthetic"),
            (date(2024, 5, 1), "Maharashtra Day"),
        ]));
        let result = resolver.weekly_expiry(date(2024, 4, 29)).unwrap();
        assert_eq!(result.expiry_date, date(2024, 4, 30));
    }

    #[test]
    fn test_weekly_expiry_on_reference_date_has_zero_days() {
        let resolver = ExpiryResolver::new(HolidaySet::new([(date(2024, 1, 18), "Synthetic")]));
        let result = resolver.weekly_expiry(date(2024, 1, 17)).unwrap();

        assert_eq!(result.expiry_date, date(2024, 1, 17));
        assert_eq!(result.days_to_expiry, 0);
    }

    #[test]
    fn test_weekly_expiry_before_reference_date_clamps_days() {
        let resolver = ExpiryResolver::new(HolidaySet::new([
            (date(2024, 1, 17), "Synthetic"),
            (date(2024, 1, 18), "Synthetic"),
        ]));
        let result = resolver.weekly_expiry(date(2024, 1, 17)).unwrap();

        assert_eq!(result.expiry_date, date(2024, 1, 16));
        assert_eq!(result.days_to_expiry, 0);
        assert_eq!(result.expiry_type, ExpiryType::Weekly);
    }

    #[test]
    fn test_invalid_date_format() {
        let err = nse().monthly_expiry_str("2024-13-01").unwrap_err();
        assert_eq!(err, ExpiryError::InvalidDateFormat("2024-13-01".into()));
        assert!(nse().weekly_expiry_str("not-a-date").is_err());
    }

    #[test]
    fn test_resolve_respects_kind() {
        let resolver = nse();

        let both = ExpiryQuery::new("nifty", "2024-01-15", ExpiryKind::Both).unwrap();
        let resolution = resolver.resolve(&both).unwrap();
        assert_eq!(resolution.index, "NIFTY");
        assert_eq!(resolution.for_date, "2024-01-15");
        assert!(resolution.monthly_expiry.is_some());
        assert!(resolution.weekly_expiry.is_some());

        let weekly = ExpiryQuery::new("NIFTY", "2024-01-15", ExpiryKind::Weekly).unwrap();
        let resolution = resolver.resolve(&weekly).unwrap();
        assert!(resolution.monthly_expiry.is_none());
        assert_eq!(resolution.weekly_expiry.unwrap().expiry_date, date(2024, 1, 18));
    }
}
