use serde::Deserialize;

// ============================================================================
// Geocoding API Response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    /// Absent entirely when the search has no matches
    #[serde(default)]
    pub results: Option<Vec<GeocodingMatch>>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct GeocodingMatch {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
}

// ============================================================================
// Forecast API Response (current conditions only)
// These structs deserialize the raw API response; not all fields are used
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: Option<CurrentBlock>,
    pub current_units: Option<CurrentUnitsBlock>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct CurrentBlock {
    pub time: String,
    pub interval: Option<u32>,
    pub temperature_2m: f64,
    pub relative_humidity_2m: u32,
    pub apparent_temperature: f64,
    pub is_day: u8,
    pub weather_code: u8,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: u32,
    pub surface_pressure: f64,
    pub cloud_cover: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentUnitsBlock {
    pub temperature_2m: Option<String>,
    pub wind_speed_10m: Option<String>,
    pub surface_pressure: Option<String>,
}

// ============================================================================
// Normalized upstream values handed to the weather service
// ============================================================================

/// First geocoding match for a city query
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    /// `"<name>, <country>"`, or just `<name>` when no country is reported
    pub display_name: String,
}

impl From<GeocodingMatch> for GeocodeResult {
    fn from(m: GeocodingMatch) -> Self {
        let display_name = match m.country.as_deref().map(str::trim) {
            Some(country) if !country.is_empty() => format!("{}, {}", m.name, country),
            _ => m.name,
        };

        Self {
            latitude: m.latitude,
            longitude: m.longitude,
            display_name,
        }
    }
}

/// Units reported by the upstream; `None` when the field was not declared
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionUnits {
    pub temperature: Option<String>,
    pub wind_speed: Option<String>,
    pub pressure: Option<String>,
}

/// Current conditions as reported by the forecast upstream
#[derive(Debug, Clone, PartialEq)]
pub struct RawConditions {
    pub latitude: f64,
    pub longitude: f64,
    pub time: String,
    pub temperature: f64,
    pub humidity: u32,
    pub apparent_temperature: f64,
    pub is_day: u8,
    pub weather_code: u8,
    pub wind_speed: f64,
    pub wind_direction: u32,
    pub surface_pressure: f64,
    pub cloud_cover: u32,
    pub units: ConditionUnits,
}

impl ForecastResponse {
    /// Flatten into `RawConditions`, or `None` when there is no current block
    pub fn into_conditions(self) -> Option<RawConditions> {
        let current = self.current?;
        let units = self
            .current_units
            .map(|u| ConditionUnits {
                temperature: u.temperature_2m,
                wind_speed: u.wind_speed_10m,
                pressure: u.surface_pressure,
            })
            .unwrap_or_default();

        Some(RawConditions {
            latitude: self.latitude,
            longitude: self.longitude,
            time: current.time,
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            apparent_temperature: current.apparent_temperature,
            is_day: current.is_day,
            weather_code: current.weather_code,
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m,
            surface_pressure: current.surface_pressure,
            cloud_cover: current.cloud_cover,
            units,
        })
    }
}
