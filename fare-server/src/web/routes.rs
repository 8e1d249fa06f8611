//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::engine::{EngineError, ScheduledFare};
use crate::estimate::EstimateInput;
use crate::tariff::{CharterCostBreakdown, CharterRequest, StageFareResult};

use super::dto::*;
use super::state::AppState;

/// Message returned for any failure of the blended estimate provider.
const ESTIMATE_FAILED: &str = "Failed to estimate fare. Please try again later.";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/depots", get(list_depots))
        .route("/calculate-fare", get(calculate_fare))
        .route("/stage-fare", get(stage_fare))
        .route("/charter/quote", post(charter_quote))
        .route("/estimate", post(estimate_fare))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every depot, one per name, in source order.
async fn list_depots(State(state): State<AppState>) -> Json<DepotsResponse> {
    let depots = state
        .engine
        .depots()
        .depots()
        .iter()
        .map(DepotResult::from_depot)
        .collect();

    Json(DepotsResponse { depots })
}

/// Scheduled fare between two named depots.
async fn calculate_fare(
    State(state): State<AppState>,
    Query(req): Query<CalculateFareQuery>,
) -> Result<Json<ScheduledFare>, AppError> {
    let origin = req
        .origin_depot
        .ok_or(EngineError::MissingParameter("originDepot"))?;
    let destination = req
        .destination_depot
        .ok_or(EngineError::MissingParameter("destinationDepot"))?;

    let fare = state.engine.scheduled_fare(&origin, &destination)?;
    Ok(Json(fare))
}

/// Stage fare for a raw distance.
async fn stage_fare(
    State(state): State<AppState>,
    Query(req): Query<StageFareQuery>,
) -> Result<Json<StageFareResult>, AppError> {
    let raw = req
        .distance_km
        .filter(|d| !d.trim().is_empty())
        .ok_or(EngineError::MissingParameter("distanceKm"))?;

    let distance_km: f64 = raw
        .trim()
        .parse()
        .map_err(|_| EngineError::InvalidParameter {
            field: "distanceKm",
            reason: format!("expected a number, got {raw:?}"),
        })?;

    Ok(Json(state.engine.stage_fare_for_distance(distance_km)?))
}

/// Quote a private charter from the rate card.
async fn charter_quote(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CharterCostBreakdown>, AppError> {
    let req: CharterQuoteRequest = parse_json(&body)?;

    let request = CharterRequest::parse(
        &req.origin,
        &req.destination,
        req.distance_km,
        &req.bus_type,
        &req.seats.into_text(),
        req.journey_date,
        req.return_date,
    )
    .map_err(EngineError::from)?;

    Ok(Json(state.engine.charter_quote(&request)?))
}

/// Blended fare estimate.
async fn estimate_fare(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let req: EstimateRequest = parse_json(&body)?;

    let input = EstimateInput::new(
        &req.start_location,
        &req.destination,
        req.distance_km,
        &req.bus_type,
        &req.time_of_travel,
    )
    .map_err(EngineError::from)?;

    let result = state.engine.estimate_fare(&input).await?;
    Ok(Json(result))
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::MissingParameter(_) | EngineError::InvalidParameter { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            EngineError::DepotNotFound(name) => {
                warn!(depot = %name, "depot not found");
                AppError::NotFound {
                    message: "Depot not found".to_string(),
                }
            }
            EngineError::NoMatchingRateTier(_) => AppError::Unprocessable {
                message: e.to_string(),
            },
            EngineError::InvalidEstimateResponse(_) | EngineError::ProviderFailure(_) => {
                error!(error = %e, "blended estimate failed");
                AppError::BadGateway {
                    message: ESTIMATE_FAILED.to_string(),
                }
            }
            EngineError::Internal(_) => {
                error!(error = %e, "internal error");
                AppError::Internal {
                    message: "Internal server error".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
