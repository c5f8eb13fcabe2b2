use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Open-Meteo geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Open-Meteo forecast endpoint (current conditions)
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Upper bound for handling one inbound request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpClientConfig,
}

/// Timeouts for the shared outbound client.
///
/// A city lookup makes two sequential upstream calls, so `request_timeout_secs`
/// must stay above twice `timeout_secs`. `AppConfig::load` enforces this.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpClientConfig {
    /// Total time allowed for one outbound call
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a connection
    #[serde(default = "default_http_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// How long idle pooled connections are kept
    #[serde(default = "default_http_pool_idle_timeout_secs")]
    pub pool_idle_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout_secs(),
            connect_timeout_secs: default_http_connect_timeout_secs(),
            pool_idle_timeout_secs: default_http_pool_idle_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_http_connect_timeout_secs() -> u64 {
    5
}

fn default_http_pool_idle_timeout_secs() -> u64 {
    90
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Start with default values
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("geocoding_url", default_geocoding_url())?
            .set_default("forecast_url", default_forecast_url())?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with CURRENT_WEATHER_)
            // Convert SCREAMING_SNAKE_CASE env vars to snake_case config keys
            .add_source(
                Environment::with_prefix("CURRENT_WEATHER")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings where the inbound deadline could cut off a city lookup
    fn validate(&self) -> Result<(), ConfigError> {
        let upstream_budget = self.http.timeout_secs.saturating_mul(2);
        if self.request_timeout_secs <= upstream_budget {
            return Err(ConfigError::Message(format!(
                "request_timeout_secs ({}) must exceed twice http.timeout_secs ({})",
                self.request_timeout_secs, self.http.timeout_secs
            )));
        }
        Ok(())
    }
}
