//! HTTP API handlers
//!
//! Thin facade over the forecast generator: resolves the city alias, tries a
//! live OpenWeatherMap fetch, substitutes the fixed fallback pattern when the
//! fetch cannot succeed, and shapes the generator output into responses.
//! Internal errors are mapped to a generic `{error}` body, never propagated
//! as stack traces.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::climate::{api_alias, supported_cities};
use crate::error::ClimacastError;
use crate::export::{export_filename, predictions_to_csv};
use crate::models::{ForecastSummary, WeatherPattern};
use crate::openweather::OpenWeatherClient;
use crate::predictor::ForecastGenerator;

/// Forecast horizon accepted by predict/export requests
const MAX_FORECAST_DAYS: u32 = 30;

/// Shared state for all handlers. The client is absent when no API key is
/// configured; prediction and export then run on the fallback pattern.
pub struct AppState {
    pub client: Option<OpenWeatherClient>,
}

type ApiError = (StatusCode, Json<Value>);

/// Map an internal error to a client-safe JSON error response
fn error_response(err: &ClimacastError) -> ApiError {
    let status = match err {
        ClimacastError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.user_message() })))
}

/// Prediction request body
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_city() -> String {
    "Delhi".to_string()
}

fn default_days() -> u32 {
    7
}

/// Prediction response envelope
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub city: String,
    pub days: u32,
    pub forecast: ForecastSummary,
}

/// Current-weather response
#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub weather: String,
    pub description: String,
    pub wind_speed: f64,
}

/// Export response: the CSV document plus its suggested filename
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub filename: String,
    pub data: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/weather/current/{city}", get(get_current_weather))
        .route("/weather/predict", post(predict_weather))
        .route("/weather/visualization/{city}/{days}", get(get_visualization))
        .route("/weather/export/{city}/{days}", get(export_weather))
        .route("/cities", get(get_cities))
        .with_state(state)
}

async fn get_current_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<CurrentWeatherResponse>, ApiError> {
    let client = state
        .client
        .as_ref()
        .ok_or_else(|| error_response(&ClimacastError::config("API key not configured")))?;

    let current = client
        .current(&city)
        .await
        .map_err(|e| error_response(&e))?;

    let (weather, description) = current
        .weather
        .first()
        .map(|tag| (tag.main.to_lowercase(), tag.description.clone()))
        .unwrap_or_default();

    Ok(Json(CurrentWeatherResponse {
        city,
        temperature: current.main.temp,
        humidity: current.main.humidity,
        pressure: current.main.pressure,
        weather,
        description,
        wind_speed: current.wind.speed,
    }))
}

async fn predict_weather(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    validate_days(request.days)?;

    let pattern = resolve_pattern(&state, &request.city).await;
    let daily = generate_daily(&pattern, &request.city, request.days)?;

    Ok(Json(PredictResponse {
        city: request.city,
        days: request.days,
        forecast: ForecastSummary::from_daily(daily),
    }))
}

async fn get_visualization(
    Path((city, days)): Path<(String, u32)>,
) -> Json<Value> {
    // Chart generation lives in the globe frontend; this endpoint is kept
    // for interface compatibility only.
    Json(json!({
        "message": format!("Visualization for {city} over {days} days is rendered client-side")
    }))
}

async fn export_weather(
    State(state): State<Arc<AppState>>,
    Path((city, days)): Path<(String, u32)>,
) -> Result<Json<ExportResponse>, ApiError> {
    validate_days(days)?;

    let pattern = resolve_pattern(&state, &city).await;
    let daily = generate_daily(&pattern, &city, days)?;

    Ok(Json(ExportResponse {
        filename: export_filename(&city, days),
        data: predictions_to_csv(&city, &daily),
    }))
}

async fn get_cities() -> Json<Value> {
    Json(json!({ "cities": supported_cities() }))
}

fn validate_days(days: u32) -> Result<(), ApiError> {
    if days < 1 || days > MAX_FORECAST_DAYS {
        return Err(error_response(&ClimacastError::validation(format!(
            "days must be between 1 and {MAX_FORECAST_DAYS}"
        ))));
    }
    Ok(())
}

/// Fetch a live pattern for the city, or fall back to the fixed default.
///
/// Predictions must always succeed: a missing key, a failed fetch, or a
/// malformed payload all degrade to [`WeatherPattern::fallback`].
async fn resolve_pattern(state: &AppState, city: &str) -> WeatherPattern {
    let Some(client) = state.client.as_ref() else {
        return WeatherPattern::fallback();
    };

    match client.observe(api_alias(city)).await {
        Ok((current, forecast)) => WeatherPattern::from_observations(&current, Some(&forecast)),
        Err(err) => {
            warn!(city, error = %err, "live fetch failed, using fallback pattern");
            WeatherPattern::fallback()
        }
    }
}

fn generate_daily(
    pattern: &WeatherPattern,
    city: &str,
    days: u32,
) -> Result<Vec<crate::models::DailyPrediction>, ApiError> {
    let generator = ForecastGenerator::for_city(city);
    let today = Utc::now().date_naive();
    let mut rng = rand::rng();
    generator
        .generate(pattern, days, today, &mut rng)
        .map_err(|e| error_response(&e))
}
