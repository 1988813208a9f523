//! OpenWeatherMap client
//!
//! Fetches current conditions and the 5-day/3-hour forecast that the
//! pattern extractor summarizes. All requests are scoped to Indian cities
//! (the `,IN` country qualifier) and metric units.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::{ClimacastError, Result};

/// HTTP client for the OpenWeatherMap REST API
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a client with a bounded request timeout
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Fetch current conditions for a city
    pub async fn current(&self, city: &str) -> Result<CurrentConditions> {
        let url = format!(
            "{}/weather?q={},IN&appid={}&units=metric",
            self.base_url, city, self.api_key
        );
        debug!(city, "fetching current conditions");
        self.get_json(&url).await
    }

    /// Fetch the 5-day/3-hour forecast for a city
    pub async fn forecast(&self, city: &str) -> Result<ForecastSeries> {
        let url = format!(
            "{}/forecast?q={},IN&appid={}&units=metric",
            self.base_url, city, self.api_key
        );
        debug!(city, "fetching forecast series");
        self.get_json(&url).await
    }

    /// Fetch current conditions and forecast together, as one observation
    pub async fn observe(&self, city: &str) -> Result<(CurrentConditions, ForecastSeries)> {
        let current = self.current(city).await?;
        let forecast = self.forecast(city).await?;
        Ok((current, forecast))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClimacastError::upstream(format!(
                "OpenWeatherMap returned {status}"
            )));
        }
        Ok(response.json().await?)
    }
}

/// Current-conditions response (the fields this service consumes)
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub main: MainReadings,
    pub weather: Vec<ConditionTag>,
    pub wind: WindReadings,
}

/// Temperature/humidity/pressure block shared by current and forecast records
#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// Condition label pair: the coarse `main` tag and its free-text description
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionTag {
    pub main: String,
    pub description: String,
}

/// Wind block of a current-conditions record
#[derive(Debug, Clone, Deserialize)]
pub struct WindReadings {
    pub speed: f64,
}

/// 5-day/3-hour forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSeries {
    pub list: Vec<ForecastSample>,
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    pub main: MainReadings,
}
