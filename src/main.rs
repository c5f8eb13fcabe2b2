mod config;
mod error;
mod extractors;
mod open_meteo;
mod openapi;
mod routes;
mod weather;

use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, HttpClientConfig};
use crate::open_meteo::{OpenMeteoForecast, OpenMeteoGeocoder};
use crate::weather::WeatherService;

/// Upper bound on idle pooled connections kept per upstream host
const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub config: Arc<AppConfig>,
}

/// Create shared HTTP client with connection pooling
fn create_http_client(config: &HttpClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "current_weather=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!(
        geocoding_url = %config.geocoding_url,
        forecast_url = %config.forecast_url,
        "Configuration loaded successfully"
    );

    // Create shared HTTP client with connection pooling
    let http_client = create_http_client(&config.http)?;
    tracing::debug!(
        timeout_secs = config.http.timeout_secs,
        connect_timeout_secs = config.http.connect_timeout_secs,
        "Shared HTTP client created"
    );

    // Both upstream clients share the pooled client
    let weather_service = Arc::new(WeatherService::new(
        Arc::new(OpenMeteoGeocoder::new(
            http_client.clone(),
            config.geocoding_url.clone(),
        )),
        Arc::new(OpenMeteoForecast::new(
            http_client,
            config.forecast_url.clone(),
        )),
    ));

    let addr = format!("{}:{}", config.host, config.port);

    // Create shared application state
    let state = AppState {
        weather_service,
        config: Arc::new(config),
    };

    let app = routes::build_router(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
