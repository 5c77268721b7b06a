//! Per-day statistics over the daytime window of a forecast.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ForecastDay, RawForecast};

/// First hour of the daytime window, inclusive.
pub const DAY_HOURS_START: u8 = 9;
/// Last hour of the daytime window, inclusive.
pub const DAY_HOURS_END: u8 = 19;

/// Conditions without precipitation.
pub const DRY_CONDITIONS: [&str; 4] = ["clear", "partly-cloudy", "cloudy", "overcast"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub hours_start: Option<u8>,
    #[serde(default)]
    pub hours_end: Option<u8>,
    #[serde(default)]
    pub hours_count: u32,
    /// `None` when no sample falls inside the daytime window.
    pub temp_avg: Option<f64>,
    pub relevant_cond_hours: u32,
}

impl DailyStat {
    pub fn from_forecast_day(day: &ForecastDay) -> Self {
        let window: Vec<_> = day
            .hours
            .iter()
            .filter(|h| (DAY_HOURS_START..=DAY_HOURS_END).contains(&h.hour))
            .collect();

        let temp_avg = if window.is_empty() {
            None
        } else {
            let sum: f64 = window.iter().map(|h| h.temp).sum();
            Some(round3(sum / window.len() as f64))
        };

        let relevant_cond_hours = window
            .iter()
            .filter(|h| DRY_CONDITIONS.contains(&h.condition.as_str()))
            .count() as u32;

        DailyStat {
            date: Some(day.date),
            hours_start: window.first().map(|h| h.hour),
            hours_end: window.last().map(|h| h.hour),
            hours_count: window.len() as u32,
            temp_avg,
            relevant_cond_hours,
        }
    }
}

/// Derives the ordered day statistics of a forecast.
pub fn analyze_days(forecast: &RawForecast) -> Vec<DailyStat> {
    forecast
        .forecasts
        .iter()
        .map(DailyStat::from_forecast_day)
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// -- Tests -------------------------------------------------------------------
