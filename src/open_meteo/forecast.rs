use async_trait::async_trait;
use reqwest::Client;

use super::models::{ForecastResponse, RawConditions};
use super::{read_json, ConditionsSource, UpstreamError};

/// Fields requested in the `current` block
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,weather_code,wind_speed_10m,wind_direction_10m,surface_pressure,cloud_cover";

pub struct OpenMeteoForecast {
    client: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ConditionsSource for OpenMeteoForecast {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<RawConditions>, UpstreamError> {
        tracing::debug!(lat = %latitude, lon = %longitude, "Fetching current conditions");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Received forecast response");

        let conditions = read_json::<ForecastResponse>(response)
            .await?
            .and_then(ForecastResponse::into_conditions);

        Ok(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::open_meteo::ConditionUnits;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn forecast(server: &MockServer) -> OpenMeteoForecast {
        OpenMeteoForecast::new(Client::new(), format!("{}/v1/forecast", server.uri()))
    }

    fn berlin_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.419998,
            "generationtime_ms": 0.05,
            "utc_offset_seconds": 0,
            "timezone": "GMT",
            "current_units": {
                "time": "iso8601",
                "interval": "seconds",
                "temperature_2m": "°C",
                "relative_humidity_2m": "%",
                "apparent_temperature": "°C",
                "is_day": "",
                "weather_code": "wmo code",
                "wind_speed_10m": "km/h",
                "wind_direction_10m": "°",
                "surface_pressure": "hPa",
                "cloud_cover": "%"
            },
            "current": {
                "time": "2024-01-15T14:30",
                "interval": 900,
                "temperature_2m": 22.5,
                "relative_humidity_2m": 65,
                "apparent_temperature": 24.2,
                "is_day": 1,
                "weather_code": 2,
                "wind_speed_10m": 12.5,
                "wind_direction_10m": 245,
                "surface_pressure": 1013.2,
                "cloud_cover": 75
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_current_conditions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "52.52"))
            .and(query_param("longitude", "13.405"))
            .and(query_param("current", CURRENT_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(berlin_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let conditions = forecast(&mock_server)
            .fetch(52.52, 13.405)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(conditions.latitude, 52.52);
        assert_eq!(conditions.longitude, 13.419998);
        assert_eq!(conditions.time, "2024-01-15T14:30");
        assert_eq!(conditions.temperature, 22.5);
        assert_eq!(conditions.humidity, 65);
        assert_eq!(conditions.apparent_temperature, 24.2);
        assert_eq!(conditions.is_day, 1);
        assert_eq!(conditions.weather_code, 2);
        assert_eq!(conditions.wind_speed, 12.5);
        assert_eq!(conditions.wind_direction, 245);
        assert_eq!(conditions.surface_pressure, 1013.2);
        assert_eq!(conditions.cloud_cover, 75);
        assert_eq!(
            conditions.units,
            ConditionUnits {
                temperature: Some("°C".to_string()),
                wind_speed: Some("km/h".to_string()),
                pressure: Some("hPa".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_without_current_block() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 52.52,
                "longitude": 13.41
            })))
            .mount(&mock_server)
            .await;

        let conditions = forecast(&mock_server).fetch(52.52, 13.405).await.unwrap();
        assert!(conditions.is_none());
    }

    #[tokio::test]
    async fn test_fetch_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let conditions = forecast(&mock_server).fetch(52.52, 13.405).await.unwrap();
        assert!(conditions.is_none());
    }

    #[tokio::test]
    async fn test_fetch_bad_request_from_upstream() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": true,
                "reason": "Latitude must be in range of -90 to 90°."
            })))
            .mount(&mock_server)
            .await;

        let err = forecast(&mock_server).fetch(52.52, 13.405).await.unwrap_err();
        match &err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("Latitude must be in range"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("upstream returned HTTP 400"));
    }

    #[tokio::test]
    async fn test_fetch_incomplete_current_block() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 52.52,
                "longitude": 13.41,
                "current": { "time": "2024-01-15T14:30", "temperature_2m": 22.5 }
            })))
            .mount(&mock_server)
            .await;

        let err = forecast(&mock_server).fetch(52.52, 13.405).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }
}
