use reqwest::Client;
use serde::Deserialize;
use serde_json::{Number, Value};
use thiserror::Error;

use crate::config::weather::WeatherSettings;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to retrieve grid point data")]
    GridLookup { details: Value },
    #[error("Failed to retrieve forecast data")]
    ForecastFetch,
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointProperties,
}

#[derive(Debug, Deserialize)]
struct PointProperties {
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: Number,
    pub temperature_unit: String,
    pub detailed_forecast: String,
}

/// Client for the National Weather Service points/forecast API.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(settings: WeatherSettings) -> Result<Self, WeatherError> {
        let client = Client::builder().user_agent(settings.user_agent).build()?;

        Ok(Self {
            client,
            base_url: settings.base_url,
        })
    }

    pub fn from_env() -> Result<Self, WeatherError> {
        Self::new(WeatherSettings::from_env())
    }

    /// Resolves the coordinates to their grid point, then returns the first
    /// period of that grid's forecast.
    pub async fn current_period(&self, lat: &str, lon: &str) -> Result<ForecastPeriod, WeatherError> {
        let forecast_url = self.forecast_url(lat, lon).await?;

        let (status, body) = self.get_json(&forecast_url).await?;
        if !status.is_success() {
            return Err(WeatherError::ForecastFetch);
        }

        let forecast: ForecastResponse = serde_json::from_value(body)
            .map_err(|e| WeatherError::InvalidResponse(format!("forecast: {}", e)))?;

        forecast
            .properties
            .periods
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::InvalidResponse("forecast has no periods".to_string()))
    }

    async fn forecast_url(&self, lat: &str, lon: &str) -> Result<String, WeatherError> {
        let url = format!("{}/points/{},{}", self.base_url, lat, lon);

        let (status, body) = self.get_json(&url).await?;
        if !status.is_success() {
            return Err(WeatherError::GridLookup { details: body });
        }

        let points: PointsResponse = serde_json::from_value(body)
            .map_err(|e| WeatherError::InvalidResponse(format!("grid point: {}", e)))?;

        Ok(points.properties.forecast)
    }

    // Error bodies are JSON too, so the body is decoded before the status is
    // checked.
    async fn get_json(&self, url: &str) -> Result<(reqwest::StatusCode, Value), WeatherError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str(&text)
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

        Ok((status, body))
    }
}
