use crate::app_config::AppConfig;
use crate::expiry::{get_expiry_routes, ExpiryAppState, ExpiryResolver};
use crate::market::{get_market_routes, MarketAppState};
use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

// -----------------------------------------------
// SERVER SETUP
// -----------------------------------------------

/// Combined router: expiry endpoints plus the market data utilities
pub fn build_router(expiry_state: ExpiryAppState, market_state: MarketAppState) -> Router {
    Router::new()
        .merge(get_expiry_routes().with_state(expiry_state))
        .merge(get_market_routes().with_state(market_state))
        .layer(CorsLayer::permissive())
}

pub async fn start_server(config: &AppConfig, resolver: ExpiryResolver) -> Result<()> {
    let holiday_count = resolver.holidays().len();
    let market_state = MarketAppState::new(&config.data_dir, &config.instruments_url)?;
    let app = build_router(ExpiryAppState::new(resolver), market_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, holidays = holiday_count, "Expiry API server listening");
    println!("🚀 Expiry API Server running on http://{}", addr);
    println!("📋 Available endpoints:");
    println!("   GET  /api/health");
    println!("   GET  /api/expiry?index=NIFTY&date=2024-01-15");
    println!("   POST /api/expiry");
    println!("   GET  /api/expiry/monthly?index=NIFTY&date=2024-01-15");
    println!("   GET  /api/expiry/weekly?index=NIFTY&date=2024-01-15");
    println!("   GET  /api/holidays");
    println!("   POST /api/instruments");
    println!("   GET  /api/price-history/download?symbol=RELIANCE.NS&start_date=2024-01-01&end_date=2024-02-01&timeframe=1d");
    println!("   GET  /api/sma?window=5&column=Close&rows=3");
    println!("   GET  /api/options");
    println!();

    axum::serve(listener, app).await?;
    Ok(())
}
