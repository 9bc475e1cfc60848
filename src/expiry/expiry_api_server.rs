use super::config;
use super::error::ExpiryError;
use super::models::{ExpiryKind, ExpiryParams, ExpiryQuery, ExpiryResolution, HealthResponse};
use super::resolver::ExpiryResolver;
use axum::{
    extract::{FromRequest, Query, Request, State},
    http::{header, Method},
    response::{Html, Json},
    routing::get,
    Form, Router,
};
use chrono::Local;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

#[derive(Clone)]
pub struct ExpiryAppState {
    resolver: Arc<ExpiryResolver>,
}

impl ExpiryAppState {
    pub fn new(resolver: ExpiryResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolver(&self) -> &ExpiryResolver {
        &self.resolver
    }
}

fn now_timestamp() -> String {
    Local::now().to_rfc3339()
}

// -----------------------------------------------
// API HANDLERS
// -----------------------------------------------

/// GET / - Endpoint index page
async fn home() -> Html<&'static str> {
    Html(config::INDEX_HTML)
}

/// GET /api/health - Health check
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: now_timestamp(),
        service: config::SERVICE_NAME,
    })
}

/// GET /api/holidays - Market holidays keyed by ISO date
async fn get_holidays(State(app_state): State<ExpiryAppState>) -> Json<BTreeMap<String, String>> {
    Json(app_state.resolver.holidays().to_iso_map())
}

fn resolve_params(
    app_state: &ExpiryAppState,
    params: ExpiryParams,
    method: &Method,
) -> Result<Json<ExpiryResolution>, ExpiryError> {
    let query = ExpiryQuery::try_from(params)?;
    let mut resolution = app_state.resolver.resolve(&query)?;

    info!(
        index = %resolution.index,
        for_date = %resolution.for_date,
        method = %method,
        "resolved expiry"
    );

    resolution.timestamp = Some(now_timestamp());
    resolution.request_method = Some(method.to_string());
    Ok(Json(resolution))
}

/// GET /api/expiry?index=NIFTY&date=2024-01-15&expiry_type=both
async fn get_expiry(
    State(app_state): State<ExpiryAppState>,
    Query(params): Query<ExpiryParams>,
) -> Result<Json<ExpiryResolution>, ExpiryError> {
    resolve_params(&app_state, params, &Method::GET)
}

/// POST /api/expiry - JSON body or urlencoded form
async fn post_expiry(
    State(app_state): State<ExpiryAppState>,
    request: Request,
) -> Result<Json<ExpiryResolution>, ExpiryError> {
    let is_json = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    let params = if is_json {
        let Json(params) = Json::<ExpiryParams>::from_request(request, &app_state)
            .await
            .map_err(|e| ExpiryError::InvalidRequestBody(e.body_text()))?;
        params
    } else {
        let Form(params) = Form::<ExpiryParams>::from_request(request, &app_state)
            .await
            .map_err(|e| ExpiryError::InvalidRequestBody(e.body_text()))?;
        params
    };

    resolve_params(&app_state, params, &Method::POST)
}

/// GET /api/expiry/monthly?index=NIFTY&date=2024-01-15
async fn get_monthly_expiry(
    State(app_state): State<ExpiryAppState>,
    Query(params): Query<ExpiryParams>,
) -> Result<Json<ExpiryResolution>, ExpiryError> {
    let query = ExpiryQuery::try_from(ExpiryParams {
        expiry_type: None,
        ..params
    })
    .map(|q| ExpiryQuery { kind: ExpiryKind::Monthly, ..q })?;

    Ok(Json(app_state.resolver.resolve(&query)?))
}

/// GET /api/expiry/weekly?index=NIFTY&date=2024-01-15
async fn get_weekly_expiry(
    State(app_state): State<ExpiryAppState>,
    Query(params): Query<ExpiryParams>,
) -> Result<Json<ExpiryResolution>, ExpiryError> {
    let query = ExpiryQuery::try_from(ExpiryParams {
        expiry_type: None,
        ..params
    })
    .map(|q| ExpiryQuery { kind: ExpiryKind::Weekly, ..q })?;

    Ok(Json(app_state.resolver.resolve(&query)?))
}

// -----------------------------------------------
// ROUTES
// -----------------------------------------------

/// Expiry routes to be merged into the main server
pub fn get_expiry_routes() -> Router<ExpiryAppState> {
    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health))
        .route("/api/holidays", get(get_holidays))
        .route("/api/expiry", get(get_expiry).post(post_expiry))
        .route("/api/expiry/monthly", get(get_monthly_expiry))
        .route("/api/expiry/weekly", get(get_weekly_expiry))
}
