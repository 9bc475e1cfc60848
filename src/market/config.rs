use std::time::Duration;

// -----------------------------------------------
// DATA SOURCES
// -----------------------------------------------
pub const KITE_INSTRUMENTS_URL: &str = "https://api.kite.trade/instruments";
pub const YAHOO_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

pub fn yahoo_chart_url(symbol: &str, period1: i64, period2: i64, interval: &str) -> String {
    format!(
        "{}/{}?period1={}&period2={}&interval={}&includePrePost=false",
        YAHOO_CHART_BASE_URL,
        urlencoding::encode(symbol),
        period1,
        period2,
        urlencoding::encode(interval)
    )
}

// -----------------------------------------------
// INSTRUMENT CSV LAYOUT
// -----------------------------------------------
pub const INSTRUMENT_MIN_COLUMNS: usize = 12;
pub const INSTRUMENT_TOKEN_COL: usize = 0;
pub const TRADING_SYMBOL_COL: usize = 2;
pub const INSTRUMENT_TYPE_COL: usize = 9;
pub const EXCHANGE_COL: usize = 11;

pub const EQUITY_EXCHANGE: &str = "NSE";
pub const EQUITY_INSTRUMENT_TYPE: &str = "EQ";

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                               AppleWebKit/537.36 (KHTML, like Gecko) \
                               Chrome/131.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.8",
    "en-IN,en;q=0.9",
];

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

// Downloads slower than this get logged
pub const SLOW_DOWNLOAD_MS: u128 = 2000;

// -----------------------------------------------
// PRICE HISTORY
// -----------------------------------------------
pub const DEFAULT_DATA_DIR: &str = "data";
pub const PREVIEW_ROWS: usize = 5;

// -----------------------------------------------
// SMA DEFAULTS
// -----------------------------------------------
pub const SMA_DEFAULT_WINDOW: usize = 5;
pub const SMA_DEFAULT_COLUMN: &str = "Close";
pub const SMA_DEFAULT_ROWS: usize = 3;
pub const SMA_DECIMALS: i32 = 4;
pub const SMA_DATE_COLUMN: &str = "Date";

pub const SMA_SAMPLE_START: (i32, u32, u32) = (2025, 11, 1);
pub const SMA_SAMPLE_CLOSES: &[i64] = &[100, 102, 101, 105, 107, 110, 108, 111, 115, 117];

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Directory that downloaded price history CSVs are written to
pub fn get_data_dir() -> String {
    std::env::var("EXPIRY_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string())
}

/// Instrument CSV location used when a request does not name one
pub fn get_instruments_url() -> String {
    std::env::var("INSTRUMENTS_URL").unwrap_or_else(|_| KITE_INSTRUMENTS_URL.to_string())
}
