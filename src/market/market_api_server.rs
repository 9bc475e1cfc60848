use super::config;
use super::error::MarketDataError;
use super::instruments;
use super::market_client::MarketClient;
use super::models::{
    InstrumentsRequest, InstrumentsResponse, OptionAdded, PriceHistoryRequest,
    PriceHistoryResponse, SmaQuery, SmaRequest,
};
use super::options_store::OptionsStore;
use super::price_history;
use super::sma::{self, SmaError};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

#[derive(Clone)]
pub struct MarketAppState {
    client: Arc<MarketClient>,
    options: Arc<OptionsStore>,
    data_dir: PathBuf,
    instruments_url: String,
}

impl MarketAppState {
    pub fn new(data_dir: impl Into<PathBuf>, instruments_url: impl Into<String>) -> Result<Self, MarketDataError> {
        Ok(Self {
            client: Arc::new(MarketClient::new()?),
            options: Arc::new(OptionsStore::with_default_seed()),
            data_dir: data_dir.into(),
            instruments_url: instruments_url.into(),
        })
    }
}

impl IntoResponse for SmaError {
    fn into_response(self) -> Response {
        warn!(error = %self, "rejected SMA request");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": self.to_string() })),
        )
            .into_response()
    }
}

// -----------------------------------------------
// API HANDLERS
// -----------------------------------------------

/// POST /api/instruments - NSE equity symbol -> instrument token map
async fn post_instruments(State(app_state): State<MarketAppState>, body: Bytes) -> Json<InstrumentsResponse> {
    let request = if body.is_empty() {
        InstrumentsRequest::default()
    } else {
        match serde_json::from_slice::<InstrumentsRequest>(&body) {
            Ok(request) => request,
            Err(e) => return Json(InstrumentsResponse::error(format!("Invalid JSON body: {}", e))),
        }
    };

    let url = request.url.unwrap_or_else(|| app_state.instruments_url.clone());
    Json(instruments::fetch_nse_equity_symbols(&app_state.client, &url).await)
}

/// GET /api/price-history/download?symbol=RELIANCE.NS&start_date=...&end_date=...&timeframe=1d
async fn get_price_history(
    State(app_state): State<MarketAppState>,
    Query(request): Query<PriceHistoryRequest>,
) -> Result<Json<PriceHistoryResponse>, MarketDataError> {
    let response = price_history::download_price_history(&app_state.client, &app_state.data_dir, request).await?;
    Ok(Json(response))
}

/// POST /api/price-history/download - same inputs as a JSON body
async fn post_price_history(
    State(app_state): State<MarketAppState>,
    Json(request): Json<PriceHistoryRequest>,
) -> Result<Json<PriceHistoryResponse>, MarketDataError> {
    let response = price_history::download_price_history(&app_state.client, &app_state.data_dir, request).await?;
    Ok(Json(response))
}

/// GET /api/sma?window=5&column=Close&rows=3 - SMA over the built-in sample
async fn get_sma(Query(query): Query<SmaQuery>) -> Result<Json<Vec<Map<String, Value>>>, SmaError> {
    let records = sma::sample_records();
    let result = sma::process_sma(
        &records,
        query.column.as_deref().unwrap_or(config::SMA_DEFAULT_COLUMN),
        query.window.unwrap_or(config::SMA_DEFAULT_WINDOW),
        query.rows.unwrap_or(config::SMA_DEFAULT_ROWS),
    )?;
    Ok(Json(result))
}

/// POST /api/sma - SMA over posted records
async fn post_sma(body: Bytes) -> Result<Json<Vec<Map<String, Value>>>, SmaError> {
    let request: SmaRequest = serde_json::from_slice(&body).map_err(|_| SmaError::MissingBody)?;
    let records = sma::validate_records(request.data)?;

    let result = sma::process_sma(
        &records,
        request.column.as_deref().unwrap_or(config::SMA_DEFAULT_COLUMN),
        request.window.unwrap_or(config::SMA_DEFAULT_WINDOW),
        request.rows.unwrap_or(config::SMA_DEFAULT_ROWS),
    )?;
    Ok(Json(result))
}

/// GET /api/options - View all options
async fn get_options(State(app_state): State<MarketAppState>) -> Json<Vec<Value>> {
    Json(app_state.options.list().await)
}

/// POST /api/options - Add a new option
async fn add_option(
    State(app_state): State<MarketAppState>,
    Json(entry): Json<Value>,
) -> Json<OptionAdded> {
    let total = app_state.options.add(entry.clone()).await;
    info!(total, "option added");

    Json(OptionAdded {
        message: "Option added successfully!",
        data: entry,
    })
}

// -----------------------------------------------
// ROUTES
// -----------------------------------------------

/// Market data routes to be merged into the main server
pub fn get_market_routes() -> Router<MarketAppState> {
    Router::new()
        .route("/api/instruments", post(post_instruments))
        .route(
            "/api/price-history/download",
            get(get_price_history).post(post_price_history),
        )
        .route("/api/sma", get(get_sma).post(post_sma))
        .route("/api/options", get(get_options).post(add_option))
}
