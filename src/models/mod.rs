//! Core data models for pattern extraction and prediction

pub mod pattern;
pub mod prediction;

pub use pattern::WeatherPattern;
pub use prediction::{DailyPrediction, ForecastSummary};
