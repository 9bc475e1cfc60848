use super::config;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;

/// NSE trading holidays for 2024
pub const NSE_HOLIDAYS_2024: &[(i32, u32, u32, &str)] = &[
    (2024, 1, 26, "Republic Day"),
    (2024, 3, 25, "Holi"),
    (2024, 3, 29, "Good Friday"),
    (2024, 4, 11, "Eid-ul-Fitr"),
    (2024, 5, 1, "Maharashtra Day"),
    (2024, 6, 17, "Bakri Eid"),
    (2024, 7, 17, "Muharram"),
    (2024, 8, 15, "Independence Day"),
    (2024, 10, 2, "Mahatma Gandhi Jayanti"),
    (2024, 11, 1, "Diwali"),
    (2024, 11, 15, "Gurunanak Jayanti"),
    (2024, 12, 25, "Christmas"),
];

/// Immutable exchange holiday table, keyed by calendar date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, S)>,
        S: Into<String>,
    {
        Self {
            holidays: entries
                .into_iter()
                .map(|(date, label)| (date, label.into()))
                .collect(),
        }
    }

    /// The built-in NSE 2024 table
    pub fn nse_2024() -> Self {
        Self::new(NSE_HOLIDAYS_2024.iter().filter_map(|&(y, m, d, label)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| (date, label))
        }))
    }

    /// Parse a JSON object of `"YYYY-MM-DD": "label"` pairs
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> =
            serde_json::from_str(raw).context("Holiday table must be a JSON object of date -> label")?;

        let mut holidays = BTreeMap::new();
        for (date_str, label) in entries {
            let date = NaiveDate::parse_from_str(&date_str, config::DATE_FORMAT)
                .with_context(|| format!("Invalid holiday date: {}", date_str))?;
            holidays.insert(date, label);
        }

        Ok(Self { holidays })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read holiday file {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.holidays.contains_key(date)
    }

    pub fn label(&self, date: &NaiveDate) -> Option<&str> {
        self.holidays.get(date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &str)> {
        self.holidays.iter().map(|(date, label)| (date, label.as_str()))
    }

    /// Dump keyed by ISO date string, in calendar order
    pub fn to_iso_map(&self) -> BTreeMap<String, String> {
        self.holidays
            .iter()
            .map(|(date, label)| (date.format(config::DATE_FORMAT).to_string(), label.clone()))
            .collect()
    }
}
