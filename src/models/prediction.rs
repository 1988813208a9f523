//! Prediction models: per-day forecasts and their aggregate summary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One generated forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    /// Date this prediction is for
    pub date: NaiveDate,
    /// 1-based day index within the forecast horizon
    pub day: u32,
    /// Predicted condition label, lowercase
    #[serde(rename = "weather_condition")]
    pub condition: String,
    /// Predicted maximum temperature in Celsius
    pub max_temp: f64,
    /// Predicted minimum temperature in Celsius; always strictly below max
    pub min_temp: f64,
    /// Mean of max and min
    pub avg_temp: f64,
    /// Predicted precipitation in mm, never negative
    pub precipitation: f64,
}

/// Aggregate statistics over a generated forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Mean of the per-day average temperatures
    pub average_temperature: f64,
    /// Mean of the per-day maximum temperatures
    pub max_temperature: f64,
    /// Mean of the per-day minimum temperatures
    pub min_temperature: f64,
    /// Total precipitation over the horizon in mm
    pub total_precipitation: f64,
    /// Most frequent condition, title-cased for display
    pub most_common_weather: String,
    /// Condition label to number of days it was predicted
    pub weather_distribution: HashMap<String, usize>,
    /// The individual forecast days, in order
    pub daily_forecast: Vec<DailyPrediction>,
}

impl ForecastSummary {
    /// Build the summary for a generated forecast.
    ///
    /// Ties in the condition histogram are broken by first appearance order,
    /// which keeps the summary deterministic for a seeded generator.
    #[must_use]
    pub fn from_daily(daily: Vec<DailyPrediction>) -> Self {
        let count = daily.len().max(1) as f64;

        let max_temperature = daily.iter().map(|d| d.max_temp).sum::<f64>() / count;
        let min_temperature = daily.iter().map(|d| d.min_temp).sum::<f64>() / count;
        let total_precipitation = daily.iter().map(|d| d.precipitation).sum();

        let mut weather_distribution: HashMap<String, usize> = HashMap::new();
        for day in &daily {
            *weather_distribution.entry(day.condition.clone()).or_insert(0) += 1;
        }

        let mut most_common_weather = String::new();
        let mut best_count = 0;
        for day in &daily {
            let n = weather_distribution[&day.condition];
            if n > best_count {
                best_count = n;
                most_common_weather = title_case(&day.condition);
            }
        }

        Self {
            average_temperature: (max_temperature + min_temperature) / 2.0,
            max_temperature,
            min_temperature,
            total_precipitation,
            most_common_weather,
            weather_distribution,
            daily_forecast: daily,
        }
    }
}

/// Capitalize the first letter of a condition label for display
fn title_case(condition: &str) -> String {
    let mut chars = condition.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
