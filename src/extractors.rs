use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{de, Deserialize, Deserializer};
use utoipa::IntoParams;

use crate::weather::{LocationQuery, WeatherError};

const MISSING_LOCATION: &str = "Either latitude+longitude OR city must be provided";
const AMBIGUOUS_LOCATION: &str = "Provide either latitude+longitude OR city, not both";

/// Raw query parameters for the current weather endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationParams {
    /// Latitude coordinate (-90 to 90). Required if city is not provided.
    #[param(example = 52.52)]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub latitude: Option<f64>,
    /// Longitude coordinate (-180 to 180). Required if city is not provided.
    #[param(example = 13.405)]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub longitude: Option<f64>,
    /// City name, e.g. "Berlin" or "New York". Required if coordinates are not provided.
    #[param(example = "Berlin")]
    pub city: Option<String>,
}

/// Parse an optional coordinate, treating an empty value (`?latitude=`) as absent
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid number: {raw}")))
}

impl LocationParams {
    /// Validate the parameters into exactly one kind of location.
    ///
    /// Range checks run first, so an out-of-range coordinate is reported even
    /// when the combination of parameters is also wrong.
    pub fn validate(self) -> Result<LocationQuery, WeatherError> {
        if let Some(latitude) = self.latitude {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(WeatherError::InvalidInput(
                    "Latitude must be between -90 and 90".to_string(),
                ));
            }
        }
        if let Some(longitude) = self.longitude {
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(WeatherError::InvalidInput(
                    "Longitude must be between -180 and 180".to_string(),
                ));
            }
        }

        let city = self
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        match (self.latitude, self.longitude, city) {
            (Some(_), Some(_), Some(_)) => {
                Err(WeatherError::InvalidInput(AMBIGUOUS_LOCATION.to_string()))
            }
            (Some(latitude), Some(longitude), None) => Ok(LocationQuery::Coordinates {
                latitude,
                longitude,
            }),
            (_, _, Some(city)) => Ok(LocationQuery::City(city)),
            // A lone latitude or longitude counts as no location at all
            _ => Err(WeatherError::InvalidInput(MISSING_LOCATION.to_string())),
        }
    }
}

/// Extracts a validated `LocationQuery` from the query string.
///
/// Malformed or contradictory parameters are rejected with a 400 before the
/// handler runs.
#[derive(Debug)]
pub struct ValidLocation(pub LocationQuery);

impl<S> FromRequestParts<S> for ValidLocation
where
    S: Send + Sync,
{
    type Rejection = WeatherError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<LocationParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WeatherError::InvalidInput(rejection.body_text()))?;

        tracing::debug!(
            latitude = ?params.latitude,
            longitude = ?params.longitude,
            city = ?params.city,
            "Location parameters received"
        );

        params.validate().map(ValidLocation)
    }
}
