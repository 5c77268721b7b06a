//! In-memory forecast provider for stage tests.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use chrono::{Days, NaiveDate};
use futures::future::BoxFuture;

use crate::{
    client::{ClientError, ForecastClient},
    forecast::{raw::HourSample, ForecastDay, RawForecast},
};

/// Answers from a fixed table; cities not in the table fail as unknown.
#[derive(Default)]
pub struct FakeClient {
    forecasts: HashMap<String, RawForecast>,
    delays: HashMap<String, u64>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// One forecast day whose daytime hours are all at `temp`, with the first
    /// `dry_hours` of them dry and the rest rainy.
    pub fn with_city(self, city: &str, temp: f64, dry_hours: u32) -> Self {
        self.with_days(city, &[Some((temp, dry_hours))])
    }

    /// One forecast day per entry. `None` produces a day without daytime
    /// samples, so it has no temperature and no dry hours.
    pub fn with_days(mut self, city: &str, days: &[Option<(f64, u32)>]) -> Self {
        let forecasts = days
            .iter()
            .enumerate()
            .map(|(i, day)| forecast_day(i as u64, *day))
            .collect();

        self.forecasts.insert(
            city.to_string(),
            RawForecast {
                city: String::new(),
                forecasts,
            },
        );
        self
    }

    pub fn with_delay(mut self, city: &str, millis: u64) -> Self {
        self.delays.insert(city.to_string(), millis);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, city: &str) -> Result<RawForecast, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(millis) = self.delays.get(city) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let mut forecast = self
            .forecasts
            .get(city)
            .cloned()
            .ok_or_else(|| ClientError::UnknownCity(city.to_string()))?;
        forecast.city = city.to_string();

        Ok(forecast)
    }
}

impl ForecastClient for FakeClient {
    fn fetch<'a>(&'a self, city: &'a str) -> BoxFuture<'a, Result<RawForecast, ClientError>> {
        Box::pin(self.answer(city))
    }
}

fn forecast_day(offset: u64, day: Option<(f64, u32)>) -> ForecastDay {
    let date = NaiveDate::from_ymd_opt(2022, 5, 26).unwrap() + Days::new(offset);

    let hours = match day {
        Some((temp, dry_hours)) => (9..=19u8)
            .enumerate()
            .map(|(i, hour)| HourSample {
                hour,
                temp,
                condition: if (i as u32) < dry_hours { "clear" } else { "rain" }.to_string(),
            })
            .collect(),
        None => vec![HourSample {
            hour: 3,
            temp: -40.0,
            condition: "clear".to_string(),
        }],
    };

    ForecastDay { date, hours }
}
