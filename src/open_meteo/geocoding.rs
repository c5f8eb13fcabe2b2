use async_trait::async_trait;
use reqwest::Client;

use super::models::{GeocodeResult, GeocodingResponse};
use super::{read_json, Geocoder, UpstreamError};

pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn lookup(&self, city: &str) -> Result<Option<GeocodeResult>, UpstreamError> {
        tracing::debug!(city = %city, "Geocoding city");

        // Use query builder for proper URL encoding - handles spaces and special chars
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Received geocoding response");

        let first = read_json::<GeocodingResponse>(response)
            .await?
            .and_then(|r| r.results)
            .and_then(|results| results.into_iter().next())
            .map(GeocodeResult::from);

        Ok(first)
    }
}
