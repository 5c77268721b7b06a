//! Forecast documents and the statistics derived from them.

pub mod city;
pub mod day;
pub mod raw;

pub use city::{CityStat, RankedResult};
pub use day::{analyze_days, DailyStat};
pub use raw::{ForecastDay, RawForecast};
