use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;

use crate::model::{Forecast, RawForecastResponse, reshape};

use super::{ForecastProvider, WeatherError};

const API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(API_URL.to_string())
    }

    /// Points the client at a different endpoint. Tests use this to target a
    /// local listener.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn fetch_forecast(&self, lat: f64, lng: f64) -> Result<Vec<Forecast>, WeatherError> {
        debug!("requesting hourly forecast for lat={lat} lng={lng}");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lng.to_string()),
                ("hourly", "temperature_2m,precipitation".to_string()),
                ("forecast_days", "1".to_string()),
                ("timezone", "GMT".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            error!("forecast request failed with status {status}");
            return Err(WeatherError::HttpStatus {
                status,
                body: truncate_body(&body),
            });
        }

        let raw: RawForecastResponse = serde_json::from_str(&body)?;

        Ok(reshape(raw))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Walk back so the cut never lands inside a multi-byte character.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &body[..end])
}
