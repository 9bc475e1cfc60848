use super::config;
use super::error::MarketDataError;
use super::models::{ChartEnvelope, ChartResult};
use crate::utility::timing::Timer;
use rand::{seq::SliceRandom, thread_rng};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, warn};

// -----------------------------------------------
// HTTP CLIENT FOR INSTRUMENT LISTS AND PRICE HISTORY
// -----------------------------------------------
pub struct MarketClient {
    client: Client,
}

impl MarketClient {
    pub fn new() -> Result<Self, MarketDataError> {
        Ok(Self {
            client: build_client()?,
        })
    }

    /// Single GET returning the status code and body text
    pub async fn fetch_text(&self, url: &str) -> Result<(StatusCode, String), MarketDataError> {
        let timer = Timer::start_with_threshold(format!("GET {}", url), config::SLOW_DOWNLOAD_MS);

        let res = self.client.get(url).send().await?;
        let status = res.status();
        let text = res.text().await?;

        debug!(url, status = status.as_u16(), bytes = text.len(), "download finished");
        timer.stop();

        Ok((status, text))
    }

    /// Fetch the chart series for one symbol between two epoch-second bounds
    pub async fn fetch_chart(
        &self,
        symbol: &str,
        period1: i64,
        period2: i64,
        interval: &str,
    ) -> Result<ChartResult, MarketDataError> {
        let url = config::yahoo_chart_url(symbol, period1, period2, interval);
        let (status, text) = self.fetch_text(&url).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::NoData);
        }
        if !status.is_success() {
            warn!(symbol, status = status.as_u16(), "chart request rejected upstream");
            return Err(MarketDataError::UpstreamStatus(status.as_u16()));
        }

        let envelope: ChartEnvelope = serde_json::from_str(&text)?;
        envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(MarketDataError::NoData)
    }
}

fn build_client() -> Result<Client, MarketDataError> {
    let mut headers = header::HeaderMap::new();

    let lang = config::ACCEPT_LANGUAGES
        .choose(&mut thread_rng())
        .copied()
        .unwrap_or("en-US,en;q=0.9");
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(lang),
    );
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

    Ok(Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .user_agent(config::USER_AGENT)
        .timeout(config::HTTP_TIMEOUT)
        .build()?)
}
