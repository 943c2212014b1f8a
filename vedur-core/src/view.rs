use std::fmt;

use crate::model::{Forecast, SearchLocation};

/// User-visible strings are Icelandic.
pub const HEADING: &str = "Veðurspá";
pub const LOADING: &str = "Leita...";
pub const ERROR_PREFIX: &str = "Villa";

/// What the results area currently shows. Exactly one state is visible at a
/// time; every render call replaces the previous state wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Results {
        location: SearchLocation,
        forecasts: Vec<Forecast>,
    },
    Error {
        message: String,
    },
}

/// Owned view state for the results area.
///
/// The container is an explicit value the controller owns rather than a
/// shared global, and each render operation is a single assignment, so no
/// intermediate empty state is ever observable.
#[derive(Debug, Default)]
pub struct ResultsView {
    state: ViewState,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Shows the fixed searching indicator.
    pub fn render_loading(&mut self) {
        self.state = ViewState::Loading;
    }

    /// Shows a heading naming the location plus one row per forecast. An
    /// empty forecast list still shows the heading with zero data rows; that
    /// is a valid result, not an error.
    pub fn render_results(&mut self, location: SearchLocation, forecasts: Vec<Forecast>) {
        self.state = ViewState::Results {
            location,
            forecasts,
        };
    }

    /// Shows the error's message behind a fixed error label.
    pub fn render_error(&mut self, error: &impl fmt::Display) {
        self.state = ViewState::Error {
            message: error.to_string(),
        };
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ViewState::Idle => Ok(()),
            ViewState::Loading => writeln!(f, "{LOADING}"),
            ViewState::Results {
                location,
                forecasts,
            } => {
                writeln!(f, "Leitarniðurstöður fyrir: {}", location.title)?;
                writeln!(f, "{:<18} {:>10} {:>12}", "Tími", "Hiti", "Úrkoma")?;
                for forecast in forecasts {
                    let temperature = match forecast.temperature {
                        Some(t) => format!("{t:.1}°C"),
                        None => "-".to_string(),
                    };
                    writeln!(
                        f,
                        "{:<18} {:>10} {:>10}mm",
                        forecast.time, temperature, forecast.precipitation
                    )?;
                }
                Ok(())
            }
            ViewState::Error { message } => writeln!(f, "{ERROR_PREFIX}: {message}"),
        }
    }
}

/// One-time startup banner: the app heading and the list of searchable
/// locations. Printed once; the prompt loop drives searches afterwards.
pub fn render_shell(locations: &[SearchLocation]) -> String {
    let mut out = String::new();
    out.push_str(HEADING);
    out.push('\n');
    out.push_str("Staðsetningar:\n");
    for location in locations {
        out.push_str("  - ");
        out.push_str(&location.title);
        out.push('\n');
    }
    out
}
