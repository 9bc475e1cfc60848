use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// -----------------------------------------------
// INSTRUMENT LIST
// -----------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstrumentsRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InstrumentsResponse {
    Success {
        count: usize,
        data: BTreeMap<String, String>,
    },
    Error {
        message: String,
    },
}

impl InstrumentsResponse {
    pub fn error(message: impl Into<String>) -> Self {
        InstrumentsResponse::Error {
            message: message.into(),
        }
    }
}

// -----------------------------------------------
// PRICE HISTORY
// -----------------------------------------------

/// Download request; every field optional so validation can report what is missing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceHistoryRequest {
    pub symbol: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub timeframe: Option<String>,
    pub resample_to: Option<String>,
}

/// One OHLCV bar in exchange-local time
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Flat CSV / preview row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRow {
    pub date: String,
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<&PriceBar> for PriceRow {
    fn from(bar: &PriceBar) -> Self {
        Self {
            date: bar.timestamp.format("%Y-%m-%d").to_string(),
            time: bar.timestamp.format("%H:%M:%S").to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceHistoryResponse {
    pub status: &'static str,
    pub file_saved: String,
    pub preview: Vec<PriceRow>,
}

// Yahoo chart payload (only the fields used)

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartMeta {
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

// -----------------------------------------------
// SIMPLE MOVING AVERAGE
// -----------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmaQuery {
    pub window: Option<usize>,
    pub column: Option<String>,
    pub rows: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmaRequest {
    pub window: Option<usize>,
    pub column: Option<String>,
    pub rows: Option<usize>,
    pub data: Option<Vec<Map<String, Value>>>,
}

// -----------------------------------------------
// OPTIONS LIST
// -----------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct OptionAdded {
    pub message: &'static str,
    /// Posted body, echoed unchanged
    pub data: Value,
}
