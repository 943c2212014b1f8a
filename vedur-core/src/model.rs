use serde::{Deserialize, Serialize};

/// A named coordinate pair the user can request a forecast for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLocation {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
}

/// One hourly forecast data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// ISO-ish timestamp, passed through from the API as-is.
    pub time: String,
    /// Degrees Celsius. `None` when the upstream temperature array is shorter
    /// than the time axis; callers must tolerate partially populated records.
    pub temperature: Option<f64>,
    /// Millimetres. Defaults to 0 when the upstream value is absent.
    pub precipitation: f64,
}

/// Wire shape of the Open-Meteo forecast response: three index-aligned
/// parallel arrays under `hourly`. Everything is optional so a malformed
/// payload degrades instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct RawForecastResponse {
    pub hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyBlock {
    pub time: Option<Vec<String>>,
    pub temperature_2m: Option<Vec<Option<f64>>>,
    pub precipitation: Option<Vec<Option<f64>>>,
}

/// Zips the parallel-array response into row-oriented [`Forecast`] records,
/// one per entry of the time axis.
///
/// Degradation contract: if `hourly` or any of its three arrays is missing,
/// the result is empty rather than an error, so a malformed third-party
/// payload never crashes the caller. A missing precipitation value at an
/// index becomes `0.0`; a missing temperature becomes `None`.
pub fn reshape(raw: RawForecastResponse) -> Vec<Forecast> {
    let Some(hourly) = raw.hourly else {
        return Vec::new();
    };

    let (Some(time), Some(temperature), Some(precipitation)) =
        (hourly.time, hourly.temperature_2m, hourly.precipitation)
    else {
        return Vec::new();
    };

    time.into_iter()
        .enumerate()
        .map(|(i, time)| Forecast {
            time,
            temperature: temperature.get(i).copied().flatten(),
            precipitation: precipitation.get(i).copied().flatten().unwrap_or(0.0),
        })
        .collect()
}
