//! Clients for the Open-Meteo geocoding and forecast APIs.
//!
//! Both clients make exactly one outbound call per lookup and never retry.
//! They share the application's pooled `reqwest::Client`.

mod forecast;
mod geocoding;
pub mod models;

pub use forecast::OpenMeteoForecast;
pub use geocoding::OpenMeteoGeocoder;
pub use models::{ConditionUnits, GeocodeResult, RawConditions};

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Resolves a free-text city name to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First match for `city`, or `None` when the upstream knows no such place
    async fn lookup(&self, city: &str) -> Result<Option<GeocodeResult>, UpstreamError>;
}

/// Source of current weather conditions for a coordinate pair
#[async_trait]
pub trait ConditionsSource: Send + Sync {
    /// Current conditions, or `None` when the upstream returned no data
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<RawConditions>, UpstreamError>;
}

/// Check the status and decode a JSON body.
///
/// An empty body yields `Ok(None)` so callers can report "no data" rather
/// than a decode failure.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(%status, error = %e, "Failed to read upstream error body");
                String::new()
            }
        };
        return Err(UpstreamError::Status { status, body });
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(&text)?))
}
