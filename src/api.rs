//! HTTP API surface
//!
//! JSON endpoints over the plan service. The planning endpoint does the
//! full assembly; the remaining endpoints expose the raw candidate data so
//! the frontend can show transport, hotel, place and weather panels before
//! a plan is requested.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::error::TripwiseError;
use crate::models::{
    HotelOption, Place, PlaceKind, TransportOption, TravelInput, TravelPlan, WeatherSummary,
};
use crate::plan_service::PlanService;

/// Shared state for all API handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PlanService>,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn error_response(error: &TripwiseError) -> (StatusCode, Json<ApiError>) {
    let status = match error {
        TripwiseError::Validation { .. } => StatusCode::BAD_REQUEST,
        TripwiseError::Provider { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ApiError {
            error: error.user_message(),
        }),
    )
}

#[derive(Deserialize)]
pub struct RouteQuery {
    pub source: String,
    pub destination: String,
}

#[derive(Serialize)]
pub struct TransportResponse {
    pub distance_km: f64,
    pub options: Vec<TransportOption>,
}

#[derive(Deserialize)]
pub struct CityQuery {
    pub city: String,
}

#[derive(Deserialize)]
pub struct PlacesQuery {
    pub city: String,
    pub kind: PlaceKind,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/plan", post(create_plan))
        .route("/transport", get(get_transport))
        .route("/hotels", get(get_hotels))
        .route("/places", get(get_places))
        .route("/weather", get(get_weather))
        .with_state(state)
}

async fn create_plan(
    State(state): State<AppState>,
    Json(input): Json<TravelInput>,
) -> ApiResult<TravelPlan> {
    match state.service.plan(input).await {
        Ok(plan) => Ok(Json(plan)),
        Err(error) => {
            tracing::warn!("plan request failed: {error}");
            Err(error_response(&error))
        }
    }
}

async fn get_transport(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> ApiResult<TransportResponse> {
    let options = state
        .service
        .transport_candidates(&query.source, &query.destination)
        .await;
    Ok(Json(TransportResponse {
        distance_km: state
            .service
            .route_distance(&query.source, &query.destination),
        options,
    }))
}

async fn get_hotels(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> ApiResult<Vec<HotelOption>> {
    Ok(Json(state.service.hotel_candidates(&query.city).await))
}

async fn get_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> ApiResult<Vec<Place>> {
    Ok(Json(
        state.service.place_candidates(&query.city, query.kind).await,
    ))
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> ApiResult<WeatherSummary> {
    Ok(Json(state.service.weather_snapshot(&query.city).await))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let error = TripwiseError::validation("budget must be positive");
        let (status, body) = error_response(&error);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.0.error.contains("budget must be positive"));
    }

    #[test]
    fn test_provider_errors_map_to_bad_gateway() {
        let error = TripwiseError::provider("geocoding timed out");
        let (status, _) = error_response(&error);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let error = TripwiseError::general("unexpected");
        let (status, _) = error_response(&error);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
