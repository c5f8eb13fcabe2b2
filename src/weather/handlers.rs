use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::models::{CurrentWeather, LocationQuery};
use super::service::WeatherError;
use crate::error::ErrorResponse;
use crate::extractors::ValidLocation;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Get current weather by coordinates or city name
///
/// GET /api/weather/current?latitude=52.52&longitude=13.405
/// GET /api/weather/current?city=Berlin
#[utoipa::path(
    get,
    path = "/api/weather/current",
    tag = "weather",
    params(crate::extractors::LocationParams),
    responses(
        (status = 200, description = "Weather data retrieved successfully", body = CurrentWeather),
        (status = 400, description = "Missing, contradictory or out-of-range parameters", body = ErrorResponse,
            example = json!({"error": "Either latitude+longitude OR city must be provided"})),
        (status = 404, description = "City not found or no data for the coordinates", body = ErrorResponse,
            example = json!({"error": "City not found: Atlantis"})),
        (status = 500, description = "Weather provider unavailable or returned bad data", body = ErrorResponse,
            example = json!({"error": "Failed to fetch weather data for city: Berlin"}))
    )
)]
pub async fn get_current_weather(
    State(state): State<AppState>,
    ValidLocation(query): ValidLocation,
) -> Result<Json<CurrentWeather>, WeatherError> {
    match &query {
        LocationQuery::Coordinates {
            latitude,
            longitude,
        } => tracing::info!(lat = %latitude, lon = %longitude, "Fetching current weather for coordinates"),
        LocationQuery::City(city) => tracing::info!(city = %city, "Fetching current weather for city"),
    }

    let weather = state.weather_service.resolve(&query).await?;
    Ok(Json(weather))
}
