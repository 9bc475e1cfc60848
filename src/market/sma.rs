use super::config;
use chrono::{Days, NaiveDate};
use serde_json::{json, Map, Value};
use thiserror::Error;

type Record = Map<String, Value>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SmaError {
    #[error("JSON body required")]
    MissingBody,

    #[error("Data list required")]
    MissingData,

    #[error("Date column missing")]
    MissingDateColumn,

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Column '{0}' contains non-numeric values")]
    NonNumeric(String),

    #[error("Window must be at least 1")]
    InvalidWindow,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Trailing simple moving average; `None` until the window is full
pub fn calculate_sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let total: f64 = values[i + 1 - window..=i].iter().sum();
                Some(round_to(total / window as f64, config::SMA_DECIMALS))
            }
        })
        .collect()
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn date_string(value: Option<&Value>) -> Value {
    match value {
        Some(Value::String(s)) => Value::String(s.clone()),
        Some(Value::Null) | None => Value::Null,
        Some(other) => Value::String(other.to_string()),
    }
}

/// Apply the SMA to `column` and return the last `rows` records as `{Date, column, SMA}`
pub fn process_sma(
    records: &[Record],
    column: &str,
    window: usize,
    rows: usize,
) -> Result<Vec<Record>, SmaError> {
    if window == 0 {
        return Err(SmaError::InvalidWindow);
    }
    if !records.iter().any(|r| r.contains_key(column)) {
        return Err(SmaError::ColumnNotFound(column.to_string()));
    }

    let values = records
        .iter()
        .map(|r| r.get(column).and_then(as_number))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| SmaError::NonNumeric(column.to_string()))?;

    let sma = calculate_sma(&values, window);
    let skip = records.len().saturating_sub(rows);

    Ok(records
        .iter()
        .zip(sma)
        .skip(skip)
        .map(|(record, sma)| {
            let mut out = Record::new();
            out.insert(
                config::SMA_DATE_COLUMN.to_string(),
                date_string(record.get(config::SMA_DATE_COLUMN)),
            );
            out.insert(column.to_string(), record.get(column).cloned().unwrap_or(Value::Null));
            out.insert("SMA".to_string(), sma.map_or(Value::Null, |v| json!(v)));
            out
        })
        .collect())
}

/// Ten consecutive daily closes used when no data is posted
pub fn sample_records() -> Vec<Record> {
    let (y, m, d) = config::SMA_SAMPLE_START;
    let Some(start) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Vec::new();
    };

    config::SMA_SAMPLE_CLOSES
        .iter()
        .enumerate()
        .filter_map(|(i, close)| {
            let date = start.checked_add_days(Days::new(i as u64))?;
            let mut record = Record::new();
            record.insert(
                config::SMA_DATE_COLUMN.to_string(),
                Value::String(date.format("%Y-%m-%d").to_string()),
            );
            record.insert(config::SMA_DEFAULT_COLUMN.to_string(), json!(close));
            Some(record)
        })
        .collect()
}

/// Validate a posted data set before running the average
pub fn validate_records(data: Option<Vec<Record>>) -> Result<Vec<Record>, SmaError> {
    let records = data.filter(|d| !d.is_empty()).ok_or(SmaError::MissingData)?;
    if !records.iter().any(|r| r.contains_key(config::SMA_DATE_COLUMN)) {
        return Err(SmaError::MissingDateColumn);
    }
    Ok(records)
}
