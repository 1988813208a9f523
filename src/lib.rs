//! `ClimaCast` - Heuristic weather prediction backend
//!
//! This library fetches current conditions for a fixed set of Indian metro
//! cities from OpenWeatherMap and generates synthetic multi-day forecasts
//! using a seasonal/persistence heuristic, served over a small HTTP API.

pub mod api;
pub mod climate;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod openweather;
pub mod predictor;
pub mod web;

// Re-export core types for public API
pub use climate::{CityClimateProfile, api_alias, profile_for, supported_cities};
pub use config::ClimacastConfig;
pub use error::ClimacastError;
pub use models::{DailyPrediction, ForecastSummary, WeatherPattern};
pub use openweather::OpenWeatherClient;
pub use predictor::ForecastGenerator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimacastError>;
