//! Core library for the `vedur` forecast app.
//!
//! This crate defines:
//! - The domain model (locations, hourly forecasts) and the reshaping of the
//!   Open-Meteo parallel-array response into row-oriented records
//! - The forecast provider abstraction and its HTTP implementation
//! - The owned results view and the search controller that drives the
//!   loading/results/error lifecycle
//!
//! It is used by `vedur-cli`, but can also be reused by other front-ends.

pub mod controller;
pub mod locations;
pub mod model;
pub mod provider;
pub mod view;

pub use controller::SearchController;
pub use model::{Forecast, SearchLocation};
pub use provider::{ForecastProvider, WeatherError, open_meteo::OpenMeteoClient};
pub use view::{ResultsView, ViewState};
