//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{Airport, DateWindow};
use crate::planner::{ScanConfig, ScanError, ScanRequest, Scanner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/airports", get(search_airports))
        .route("/api/scan", post(scan))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search airports by code, name or country.
async fn search_airports(
    State(state): State<AppState>,
    Query(req): Query<AirportSearchRequest>,
) -> Json<AirportSearchResponse> {
    let airports = state.directory.search(&req.terms()).await;
    Json(AirportSearchResponse { airports })
}

/// Scan for itineraries.
async fn scan(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let body: ScanRequestBody = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid scan body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let (request, config) = scan_params(body, &state.config)?;

    let source = state.source.as_ref();
    let result = Scanner::new(source, source, &config).scan(&request).await?;

    Ok(Json(ScanResponse {
        solutions: result.solutions,
        paths_found: result.paths_found,
        requests_made: result.requests_made,
    })
    .into_response())
}

/// Turn a request body into a scan request and configuration.
///
/// Parameters the body leaves out come from `defaults`.
fn scan_params(
    body: ScanRequestBody,
    defaults: &ScanConfig,
) -> Result<(ScanRequest, ScanConfig), AppError> {
    let origins = parse_airports(&body.origins, "origin")?;
    let destinations = parse_airports(&body.destinations, "destination")?;

    let window = DateWindow::new(body.earliest, body.latest).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let config = ScanConfig::new(
        body.max_flights.unwrap_or(defaults.max_hops),
        body.min_layover.unwrap_or(defaults.min_layover_mins),
        body.max_layover.unwrap_or(defaults.max_layover_mins),
        defaults.fetch_concurrency,
    );

    Ok((ScanRequest::new(origins, destinations, window), config))
}

fn parse_airports(codes: &[String], what: &str) -> Result<Vec<Airport>, AppError> {
    codes
        .iter()
        .map(|code| {
            Airport::parse_normalized(code).map_err(|_| AppError::BadRequest {
                message: format!("Invalid {what} airport code: {code}"),
            })
        })
        .collect()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
}

impl From<ScanError> for AppError {
    fn from(e: ScanError) -> Self {
        match e {
            ScanError::InvalidArgument(message) => AppError::BadRequest { message },
            ScanError::BackendUnavailable(message) => AppError::BadGateway { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
