//! Raw forecast document as returned by the provider.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One city's forecast. Only the fields the ranking needs are decoded; the
/// rest of the provider document is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    /// Stamped by the fetch stage, the provider does not send it.
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub forecasts: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub hours: Vec<HourSample>,
}

/// A single hourly sample within a forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSample {
    #[serde(deserialize_with = "deserialize_hour")]
    pub hour: u8,
    pub temp: f64,
    pub condition: String,
}

impl RawForecast {
    /// Decodes a provider response body and stamps it with `city`.
    pub fn from_slice(city: &str, body: &[u8]) -> serde_json::Result<Self> {
        let mut forecast: RawForecast = serde_json::from_slice(body)?;
        forecast.city = city.to_string();

        Ok(forecast)
    }
}

// The provider sends hours as strings ("13"); accept plain numbers as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum HourRepr {
    Number(u8),
    Text(String),
}

fn deserialize_hour<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match HourRepr::deserialize(deserializer)? {
        HourRepr::Number(hour) => Ok(hour),
        HourRepr::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

// -- Tests -------------------------------------------------------------------
