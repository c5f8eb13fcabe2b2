use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use super::models::{coordinates_label, CurrentWeather, LocationQuery};
use crate::error::HttpError;
use crate::impl_into_response;
use crate::open_meteo::{ConditionsSource, Geocoder, UpstreamError};

const NO_DATA_MESSAGE: &str = "No weather data available for the specified coordinates";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: UpstreamError,
    },
}

impl WeatherError {
    fn city_not_found(city: &str) -> Self {
        Self::NotFound(format!("City not found: {}", city))
    }

    fn coordinates_failure(source: UpstreamError) -> Self {
        Self::Upstream {
            message: format!("Failed to fetch weather data: {}", source),
            source,
        }
    }

    fn city_failure(city: &str, source: UpstreamError) -> Self {
        Self::Upstream {
            message: format!("Failed to fetch weather data for city: {}", city),
            source,
        }
    }
}

impl HttpError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl_into_response!(WeatherError);

/// Resolves a location query into current weather via the upstream clients
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    conditions: Arc<dyn ConditionsSource>,
}

impl WeatherService {
    pub fn new(geocoder: Arc<dyn Geocoder>, conditions: Arc<dyn ConditionsSource>) -> Self {
        Self {
            geocoder,
            conditions,
        }
    }

    pub async fn resolve(&self, query: &LocationQuery) -> Result<CurrentWeather, WeatherError> {
        match query {
            LocationQuery::Coordinates {
                latitude,
                longitude,
            } => {
                self.weather_at(*latitude, *longitude, coordinates_label(*latitude, *longitude))
                    .await
            }
            LocationQuery::City(city) => self.weather_for_city(city).await,
        }
    }

    async fn weather_for_city(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        tracing::debug!(city = %city, "Resolving city");

        let location = match self.geocoder.lookup(city).await {
            Ok(Some(location)) => location,
            Ok(None) => {
                tracing::warn!(city = %city, "Geocoding returned no matches");
                return Err(WeatherError::city_not_found(city));
            }
            Err(e) => {
                tracing::error!(city = %city, error = %e, "Geocoding request failed");
                return Err(WeatherError::city_failure(city, e));
            }
        };

        tracing::debug!(
            city = %city,
            resolved = %location.display_name,
            lat = %location.latitude,
            lon = %location.longitude,
            "City resolved"
        );

        // Keep not-found as is, but name the city in transport failures
        self.weather_at(location.latitude, location.longitude, location.display_name)
            .await
            .map_err(|e| match e {
                WeatherError::Upstream { source, .. } => WeatherError::city_failure(city, source),
                other => other,
            })
    }

    async fn weather_at(
        &self,
        latitude: f64,
        longitude: f64,
        label: String,
    ) -> Result<CurrentWeather, WeatherError> {
        let raw = match self.conditions.fetch(latitude, longitude).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::warn!(lat = %latitude, lon = %longitude, "No current conditions returned");
                return Err(WeatherError::NotFound(NO_DATA_MESSAGE.to_string()));
            }
            Err(e) => {
                tracing::error!(
                    lat = %latitude,
                    lon = %longitude,
                    error = %e,
                    "Weather request failed"
                );
                return Err(WeatherError::coordinates_failure(e));
            }
        };

        let weather = CurrentWeather::from_conditions(raw, label);

        tracing::info!(
            location = %weather.location,
            temp = %weather.temperature,
            "Weather data fetched successfully"
        );

        Ok(weather)
    }
}
