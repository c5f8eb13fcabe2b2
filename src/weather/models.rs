use serde::Serialize;
use utoipa::ToSchema;

use crate::open_meteo::RawConditions;

const DEFAULT_TEMPERATURE_UNIT: &str = "°C";
const DEFAULT_WIND_SPEED_UNIT: &str = "km/h";
const DEFAULT_PRESSURE_UNIT: &str = "hPa";

/// A validated location request: coordinates or a city name, never both
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates { latitude: f64, longitude: f64 },
    City(String),
}

/// Current weather information for a specific location
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    /// Latitude reported by the weather provider
    #[schema(example = 52.52)]
    pub latitude: f64,
    /// Longitude reported by the weather provider
    #[schema(example = 13.405)]
    pub longitude: f64,
    /// Human-readable location name
    #[schema(example = "Berlin, Germany")]
    pub location: String,
    #[schema(example = 22.5)]
    pub temperature: f64,
    #[schema(example = "°C")]
    pub temperature_unit: String,
    /// Relative humidity percentage
    #[schema(example = 65, minimum = 0, maximum = 100)]
    pub humidity: u32,
    /// Apparent ("feels like") temperature
    #[schema(example = 24.2)]
    pub apparent_temperature: f64,
    #[schema(example = "Partly cloudy")]
    pub weather_description: String,
    /// WMO weather code
    #[schema(example = 2, minimum = 0, maximum = 99)]
    pub weather_code: u8,
    #[schema(example = 12.5)]
    pub wind_speed: f64,
    #[schema(example = "km/h")]
    pub wind_speed_unit: String,
    /// Wind direction in degrees
    #[schema(example = 245, minimum = 0, maximum = 360)]
    pub wind_direction: u32,
    /// Surface pressure
    #[schema(example = 1013.2)]
    pub pressure: f64,
    #[schema(example = "hPa")]
    pub pressure_unit: String,
    /// Cloud cover percentage
    #[schema(example = 75, minimum = 0, maximum = 100)]
    pub cloud_cover: u32,
    pub is_day: bool,
    /// Observation time as reported by the provider
    #[schema(example = "2024-01-15T14:30")]
    pub timestamp: String,
}

impl CurrentWeather {
    /// Build the response from upstream conditions and a location label
    pub fn from_conditions(raw: RawConditions, location: String) -> Self {
        let units = raw.units;

        Self {
            latitude: raw.latitude,
            longitude: raw.longitude,
            location,
            temperature: raw.temperature,
            temperature_unit: units
                .temperature
                .unwrap_or_else(|| DEFAULT_TEMPERATURE_UNIT.to_string()),
            humidity: raw.humidity,
            apparent_temperature: raw.apparent_temperature,
            weather_description: weather_description(raw.weather_code).to_string(),
            weather_code: raw.weather_code,
            wind_speed: raw.wind_speed,
            wind_speed_unit: units
                .wind_speed
                .unwrap_or_else(|| DEFAULT_WIND_SPEED_UNIT.to_string()),
            wind_direction: raw.wind_direction,
            pressure: raw.surface_pressure,
            pressure_unit: units
                .pressure
                .unwrap_or_else(|| DEFAULT_PRESSURE_UNIT.to_string()),
            cloud_cover: raw.cloud_cover,
            is_day: raw.is_day == 1,
            timestamp: raw.time,
        }
    }
}

/// Label used when the location came in as bare coordinates
pub fn coordinates_label(latitude: f64, longitude: f64) -> String {
    format!("{:.4}, {:.4}", latitude, longitude)
}

/// Text for a WMO present-weather code
pub fn weather_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow fall",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}
