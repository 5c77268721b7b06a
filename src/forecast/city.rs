//! Per-city statistics and the ranked result.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::DailyStat;
use crate::error::{Error, Result};

/// The record carried through the hand-off queue and persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStat {
    pub city: String,
    pub days: Vec<DailyStat>,
    pub avg_temperature: f64,
    pub avg_hours_without_precipitation: f64,
    /// Unset until the analysis stage ranks the city.
    #[serde(default)]
    pub rating: Option<u32>,
}

impl CityStat {
    /// Builds an unrated record from a city's day statistics.
    ///
    /// The temperature mean only counts days with a daytime temperature,
    /// while the dry-hours mean counts every day, so the two averages may use
    /// different denominators. Fails when no day has a temperature.
    pub fn from_days(city: impl Into<String>, days: Vec<DailyStat>) -> Result<Self> {
        let city = city.into();

        let temperatures: Vec<f64> = days.iter().filter_map(|d| d.temp_avg).collect();
        if temperatures.is_empty() {
            return Err(Error::no_temperature_data(city));
        }
        let avg_temperature = temperatures.iter().sum::<f64>() / temperatures.len() as f64;

        let dry_hours: u32 = days.iter().map(|d| d.relevant_cond_hours).sum();
        let avg_hours_without_precipitation = dry_hours as f64 / days.len() as f64;

        Ok(CityStat {
            city,
            days,
            avg_temperature,
            avg_hours_without_precipitation,
            rating: None,
        })
    }

    /// Orders two records by their ranking key, best first.
    ///
    /// Numerically equal keys compare equal, `-0.0` included, so ties are
    /// left to the caller's stable sort.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        descending(self.avg_temperature, other.avg_temperature).then_with(|| {
            descending(
                self.avg_hours_without_precipitation,
                other.avg_hours_without_precipitation,
            )
        })
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Every surviving city with its rating set, in store order.
///
/// Only [`crate::pipeline::analyze::rank`] constructs this, so every record
/// is rated and the ratings form the sequence `1..=N`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    cities: Vec<CityStat>,
}

impl RankedResult {
    pub(crate) fn new(cities: Vec<CityStat>) -> Self {
        RankedResult { cities }
    }

    pub fn cities(&self) -> &[CityStat] {
        &self.cities
    }

    /// Records ordered best first.
    pub fn by_rank(&self) -> Vec<&CityStat> {
        let mut cities: Vec<&CityStat> = self.cities.iter().collect();
        cities.sort_by_key(|c| c.rating);
        cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Rating of `city`, if it survived.
    #[cfg(test)]
    pub fn rating_of(&self, city: &str) -> Option<u32> {
        self.cities
            .iter()
            .find(|c| c.city == city)
            .and_then(|c| c.rating)
    }
}

// -- Tests -------------------------------------------------------------------
