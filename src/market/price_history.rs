use super::config;
use super::error::MarketDataError;
use super::market_client::MarketClient;
use super::models::{ChartResult, PriceBar, PriceHistoryRequest, PriceHistoryResponse, PriceRow};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Intervals whose bars represent whole sessions rather than intraday slots
const SESSION_INTERVALS: &[&str] = &["1d", "5d", "1wk", "1mo", "3mo"];

/// Request after presence and date checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPriceRequest {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timeframe: String,
    pub resample_to: Option<String>,
}

fn required(value: Option<String>) -> Result<String, MarketDataError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(MarketDataError::MissingInputs)
}

fn parse_date(value: &str) -> Result<NaiveDate, MarketDataError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| MarketDataError::InvalidDate(value.to_string()))
}

pub fn validate_request(request: PriceHistoryRequest) -> Result<ValidatedPriceRequest, MarketDataError> {
    let symbol = required(request.symbol)?;
    let start_date = required(request.start_date)?;
    let end_date = required(request.end_date)?;
    let timeframe = required(request.timeframe)?;

    Ok(ValidatedPriceRequest {
        symbol,
        start_date: parse_date(&start_date)?,
        end_date: parse_date(&end_date)?,
        timeframe,
        resample_to: request
            .resample_to
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
    })
}

/// Turn the chart payload into exchange-local bars, dropping incomplete rows
pub fn bars_from_chart(chart: &ChartResult, interval: &str) -> Vec<PriceBar> {
    let Some(quote) = chart.indicators.quote.first() else {
        return Vec::new();
    };
    let session_bars = SESSION_INTERVALS.contains(&interval);

    chart
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let field = |series: &Vec<Option<f64>>| series.get(i).copied().flatten();

            let mut timestamp = DateTime::from_timestamp(ts + chart.meta.gmtoffset, 0)?.naive_utc();
            if session_bars {
                timestamp = timestamp.date().and_time(NaiveTime::MIN);
            }

            Some(PriceBar {
                timestamp,
                open: field(&quote.open)?,
                high: field(&quote.high)?,
                low: field(&quote.low)?,
                close: field(&quote.close)?,
                volume: field(&quote.volume)?.max(0.0) as u64,
            })
        })
        .collect()
}

/// Parse a resample rule such as `5min`, `15T`, `1H`, `D` or `30s`
pub fn parse_resample_rule(rule: &str) -> Result<TimeDelta, MarketDataError> {
    let unsupported = || MarketDataError::UnsupportedResample(rule.to_string());

    let trimmed = rule.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(unsupported)?;
    let (count, unit) = trimmed.split_at(split);

    let count: i64 = if count.is_empty() {
        1
    } else {
        count.parse().map_err(|_| unsupported())?
    };
    if count <= 0 {
        return Err(unsupported());
    }

    match unit.to_ascii_lowercase().as_str() {
        "s" | "sec" => Ok(TimeDelta::seconds(count)),
        "t" | "min" => Ok(TimeDelta::minutes(count)),
        "h" => Ok(TimeDelta::hours(count)),
        "d" => Ok(TimeDelta::days(count)),
        _ => Err(unsupported()),
    }
}

/// Aggregate bars into fixed buckets: first open, max high, min low, last close, summed volume.
///
/// Buckets are anchored at midnight; buckets with no bars are not emitted.
pub fn resample(bars: &[PriceBar], step: TimeDelta) -> Vec<PriceBar> {
    let step_secs = step.num_seconds().max(1);
    let mut buckets: BTreeMap<i64, PriceBar> = BTreeMap::new();

    let mut sorted: Vec<&PriceBar> = bars.iter().collect();
    sorted.sort_by_key(|bar| bar.timestamp);

    for bar in sorted {
        let secs = bar.timestamp.and_utc().timestamp();
        let bucket = secs.div_euclid(step_secs) * step_secs;

        buckets
            .entry(bucket)
            .and_modify(|agg| {
                agg.high = agg.high.max(bar.high);
                agg.low = agg.low.min(bar.low);
                agg.close = bar.close;
                agg.volume += bar.volume;
            })
            .or_insert_with(|| PriceBar {
                timestamp: DateTime::from_timestamp(bucket, 0)
                    .map(|dt| dt.naive_utc())
                    .unwrap_or(bar.timestamp),
                ..bar.clone()
            });
    }

    buckets.into_values().collect()
}

/// `<data_dir>/<symbol>_<suffix>.csv`, with path separators in the symbol neutralised
pub fn output_path(data_dir: &Path, symbol: &str, suffix: &str) -> PathBuf {
    let safe_symbol = symbol.replace(['/', '\\'], "_");
    data_dir.join(format!("{}_{}.csv", safe_symbol, suffix))
}

pub fn write_csv(path: &Path, rows: &[PriceRow]) -> Result<(), MarketDataError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Validate, download, clean, optionally resample and persist one price history request
pub async fn download_price_history(
    client: &MarketClient,
    data_dir: &Path,
    request: PriceHistoryRequest,
) -> Result<PriceHistoryResponse, MarketDataError> {
    let request = validate_request(request)?;
    let step = request
        .resample_to
        .as_deref()
        .map(parse_resample_rule)
        .transpose()?;

    let period1 = request.start_date.and_time(NaiveTime::MIN).and_utc().timestamp();
    let period2 = request.end_date.and_time(NaiveTime::MIN).and_utc().timestamp();

    let chart = client
        .fetch_chart(&request.symbol, period1, period2, &request.timeframe)
        .await?;

    let mut bars = bars_from_chart(&chart, &request.timeframe);
    if bars.is_empty() {
        return Err(MarketDataError::NoData);
    }
    if let Some(step) = step {
        bars = resample(&bars, step);
    }

    let rows: Vec<PriceRow> = bars.iter().map(PriceRow::from).collect();
    let suffix = request.resample_to.as_deref().unwrap_or(&request.timeframe);
    let path = output_path(data_dir, &request.symbol, suffix);
    write_csv(&path, &rows)?;

    info!(symbol = %request.symbol, rows = rows.len(), file = %path.display(), "saved price history");

    Ok(PriceHistoryResponse {
        status: "success",
        file_saved: path.display().to_string(),
        preview: rows.into_iter().take(config::PREVIEW_ROWS).collect(),
    })
}
