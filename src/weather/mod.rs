pub mod handlers;
pub mod models;
pub mod service;

pub use models::{CurrentWeather, LocationQuery};
pub use service::{WeatherError, WeatherService};
