//! Fetch stage: one provider call per city on a bounded I/O pool.

use futures::{stream, StreamExt};
use indicatif::ProgressBar;
use tracing::{error, info};

use crate::{
    client::{ClientError, ForecastClient},
    forecast::RawForecast,
};

/// Result of fetching a single city. Failures are kept as values so the
/// compute stage can log and skip them.
#[derive(Debug)]
pub struct FetchOutcome {
    pub city: String,
    pub result: Result<RawForecast, ClientError>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fetches every city with at most `workers` requests in flight.
///
/// Never fails: a provider error is logged and returned in the city's
/// outcome. Outcome `i` belongs to `cities[i]` whatever the completion order.
pub async fn fetch_all<C>(
    client: &C,
    cities: &[String],
    workers: usize,
    progress_bar: &ProgressBar,
) -> Vec<FetchOutcome>
where
    C: ForecastClient + ?Sized,
{
    info!(
        "Fetching forecasts for {} cities with {} workers",
        cities.len(),
        workers
    );

    let outcomes: Vec<FetchOutcome> = stream::iter(cities)
        .map(|city| async move {
            info!("Fetching forecast for {}", city);
            let result = client.fetch(city).await;

            match &result {
                Ok(forecast) => info!(
                    "Received forecast for {} ({} days)",
                    city,
                    forecast.forecasts.len()
                ),
                Err(e) => error!("Failed to fetch forecast for {}: {}", city, e),
            }
            progress_bar.inc(1);

            FetchOutcome {
                city: city.clone(),
                result,
            }
        })
        .buffered(workers.max(1))
        .collect()
        .await;

    let fetched = outcomes.iter().filter(|o| o.is_ok()).count();
    info!("Fetched {}/{} forecasts", fetched, cities.len());

    outcomes
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::FakeClient;

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn should_keep_input_order() {
        // Later cities answer first.
        let client = FakeClient::new()
            .with_city("A", 10.0, 1)
            .with_city("B", 10.0, 1)
            .with_city("C", 10.0, 1)
            .with_delay("A", 30)
            .with_delay("B", 15);

        let outcomes = fetch_all(&client, &cities(&["A", "B", "C"]), 3, &ProgressBar::hidden()).await;

        let order: Vec<_> = outcomes.iter().map(|o| o.city.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert!(outcomes.iter().all(FetchOutcome::is_ok));
    }

    #[tokio::test]
    async fn should_absorb_provider_failure() {
        let client = FakeClient::new().with_city("B", 10.0, 1);

        let outcomes = fetch_all(&client, &cities(&["A", "B"]), 2, &ProgressBar::hidden()).await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0].result, Err(ClientError::UnknownCity(_))));
        assert_eq!(outcomes[1].result.as_ref().unwrap().city, "B");
    }

    #[tokio::test]
    async fn should_call_provider_once_per_city() {
        let client = FakeClient::new()
            .with_city("A", 1.0, 1)
            .with_city("B", 1.0, 1);

        fetch_all(&client, &cities(&["A", "B"]), 1, &ProgressBar::hidden()).await;

        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn should_bound_requests_in_flight() {
        let mut client = FakeClient::new();
        let names: Vec<String> = (0..12).map(|i| format!("CITY{}", i)).collect();
        for name in &names {
            client = client.with_city(name, 1.0, 1).with_delay(name, 5);
        }

        fetch_all(&client, &names, 3, &ProgressBar::hidden()).await;

        assert!(client.max_in_flight() <= 3);
    }

    #[tokio::test]
    async fn should_handle_no_cities() {
        let client = FakeClient::new();

        let outcomes = fetch_all(&client, &[], 4, &ProgressBar::hidden()).await;

        assert!(outcomes.is_empty());
    }
}
