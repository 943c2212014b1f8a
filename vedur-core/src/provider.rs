use crate::model::Forecast;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod open_meteo;

/// Failure modes of a forecast lookup.
///
/// A response with a missing `hourly` substructure is deliberately not an
/// error; it degrades to an empty forecast list (see [`crate::model::reshape`]).
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Non-2xx HTTP response. The status Display includes the status text,
    /// e.g. "500 Internal Server Error".
    #[error("forecast request failed with status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// Transport-level failure (DNS, connection refused, offline).
    #[error("failed to reach the forecast service: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not valid JSON at all.
    #[error("failed to parse forecast response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seam between the search controller and the concrete HTTP client, so the
/// controller can be exercised against scripted providers in tests.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetches the hourly forecast for one coordinate pair. Exactly one
    /// outbound request per invocation; no retry, timeout, or de-duplication.
    async fn fetch_forecast(&self, lat: f64, lng: f64) -> Result<Vec<Forecast>, WeatherError>;
}
