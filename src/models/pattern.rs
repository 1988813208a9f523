//! Weather pattern model and extraction
//!
//! A [`WeatherPattern`] is the compact summary of current conditions that
//! feeds the forecast generator. It is derived once per prediction request
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::openweather::{CurrentConditions, ForecastSeries};

/// How many 3-hour forecast samples feed the trend estimate (~24 hours)
const TREND_SAMPLE_COUNT: usize = 8;

/// Summary of current/recent weather conditions feeding the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPattern {
    /// Current temperature in Celsius
    pub average_temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Dominant condition label, lowercase (e.g. "clear", "rain")
    pub dominant_condition: String,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Short-term temperature slope in Celsius per 3-hour step
    #[serde(default)]
    pub temperature_trend: f64,
}

impl WeatherPattern {
    /// Fixed default pattern used whenever live data is unavailable
    /// (missing API key, fetch failure). Predictions must always succeed.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            average_temperature: 25.0,
            humidity: 65.0,
            pressure: 1013.0,
            dominant_condition: "clear".to_string(),
            wind_speed: 3.5,
            temperature_trend: 0.1,
        }
    }

    /// Derive a pattern from raw OpenWeatherMap payloads.
    ///
    /// Scalar fields copy straight from the current-conditions record, with
    /// the condition label normalized to lowercase. When forecast data is
    /// present, the trend is a finite-difference slope over the next ~24
    /// hours of samples; otherwise it stays at 0. Pure transform, no I/O.
    #[must_use]
    pub fn from_observations(
        current: &CurrentConditions,
        forecast: Option<&ForecastSeries>,
    ) -> Self {
        let dominant_condition = current
            .weather
            .first()
            .map(|w| w.main.to_lowercase())
            .unwrap_or_else(|| "clear".to_string());

        let temperature_trend = forecast
            .map(|f| {
                let temps: Vec<f64> = f
                    .list
                    .iter()
                    .take(TREND_SAMPLE_COUNT)
                    .map(|sample| sample.main.temp)
                    .collect();
                mean_successive_difference(&temps)
            })
            .unwrap_or(0.0);

        Self {
            average_temperature: current.main.temp,
            humidity: current.main.humidity,
            pressure: current.main.pressure,
            dominant_condition,
            wind_speed: current.wind.speed,
            temperature_trend,
        }
    }
}

/// Mean of successive differences: a simple slope estimate
fn mean_successive_difference(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let diffs: f64 = values.windows(2).map(|w| w[1] - w[0]).sum();
    diffs / (values.len() - 1) as f64
}
