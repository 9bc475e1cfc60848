use super::config;
use super::market_client::MarketClient;
use super::models::InstrumentsResponse;
use csv::ReaderBuilder;
use reqwest::StatusCode;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Build the NSE equity `tradingsymbol -> instrument_token` map from an instruments CSV.
///
/// Rows shorter than the expected layout are skipped, as are unreadable records.
pub fn parse_nse_equity_symbols(csv_text: &str) -> InstrumentsResponse {
    if csv_text.lines().count() < 2 {
        return InstrumentsResponse::error("CSV file is empty");
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut symbol_token_map = BTreeMap::new();

    for record in reader.records() {
        let Ok(record) = record else { continue };
        if record.len() < config::INSTRUMENT_MIN_COLUMNS {
            continue;
        }

        let exchange = &record[config::EXCHANGE_COL];
        let instrument_type = &record[config::INSTRUMENT_TYPE_COL];

        if exchange == config::EQUITY_EXCHANGE && instrument_type == config::EQUITY_INSTRUMENT_TYPE {
            symbol_token_map.insert(
                record[config::TRADING_SYMBOL_COL].to_string(),
                record[config::INSTRUMENT_TOKEN_COL].to_string(),
            );
        }
    }

    if symbol_token_map.is_empty() {
        return InstrumentsResponse::error("No NSE EQ symbols found in CSV");
    }

    InstrumentsResponse::Success {
        count: symbol_token_map.len(),
        data: symbol_token_map,
    }
}

/// Download the instruments CSV and reduce it to NSE equities
pub async fn fetch_nse_equity_symbols(client: &MarketClient, url: &str) -> InstrumentsResponse {
    let (status, text) = match client.fetch_text(url).await {
        Ok(res) => res,
        Err(e) => {
            warn!(url, error = %e, "instrument download failed");
            return InstrumentsResponse::error(e.to_string());
        }
    };

    if status != StatusCode::OK {
        return InstrumentsResponse::error(format!(
            "Unable to download CSV! Status code: {}",
            status.as_u16()
        ));
    }

    let response = parse_nse_equity_symbols(&text);
    if let InstrumentsResponse::Success { count, .. } = &response {
        info!(url, count, "parsed NSE equity instruments");
    }
    response
}
