//! Compute stage: per-city statistics on a CPU worker pool.

use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use super::{fetch::FetchOutcome, handoff::Producer};
use crate::{
    config::MissingTemperaturePolicy,
    error::{Error, Result},
    forecast::{analyze_days, CityStat},
};

/// Computes statistics for every fetched city on `workers` threads and
/// pushes each record onto the hand-off queue.
///
/// Runs on the blocking pool so the async runtime stays free. `producer` is
/// dropped when the stage finishes, which closes the queue once no other
/// producer handle remains. Returns the number of records emitted.
pub async fn run_compute(
    outcomes: Vec<FetchOutcome>,
    producer: Producer,
    workers: usize,
    policy: MissingTemperaturePolicy,
    progress_bar: ProgressBar,
) -> Result<usize> {
    tokio::task::spawn_blocking(move || {
        compute_all(outcomes, &producer, workers, policy, &progress_bar)
    })
    .await?
}

pub fn compute_all(
    outcomes: Vec<FetchOutcome>,
    producer: &Producer,
    workers: usize,
    policy: MissingTemperaturePolicy,
    progress_bar: &ProgressBar,
) -> Result<usize> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("compute-{}", i))
        .build()
        .map_err(|e| Error::compute(e.to_string()))?;

    info!(
        "Computing statistics for {} forecasts with {} workers",
        outcomes.len(),
        workers
    );

    let emitted = AtomicUsize::new(0);
    pool.install(|| {
        outcomes.into_par_iter().try_for_each(|outcome| -> Result<()> {
            let stat = compute_city(outcome, policy);
            progress_bar.inc(1);

            match stat? {
                Some(stat) => {
                    let city = stat.city.clone();
                    producer.push(stat).map_err(|_| {
                        Error::compute(format!("hand-off queue closed before {} was queued", city))
                    })?;
                    debug!("Queued statistics for {}", city);
                    emitted.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                }
                None => Ok(()),
            }
        })
    })?;

    let emitted = emitted.into_inner();
    info!("Computed statistics for {} cities", emitted);

    Ok(emitted)
}

/// Statistics for one city, or `None` when the city is dropped.
pub fn compute_city(
    outcome: FetchOutcome,
    policy: MissingTemperaturePolicy,
) -> Result<Option<CityStat>> {
    let forecast = match outcome.result {
        Ok(forecast) => forecast,
        Err(e) => {
            error!("No forecast for {}, skipping: {}", outcome.city, e);
            return Ok(None);
        }
    };

    let days = analyze_days(&forecast);
    match CityStat::from_days(outcome.city, days) {
        Ok(stat) => {
            debug!(
                "{}: avg temperature {:.3}, avg dry hours {:.3}",
                stat.city, stat.avg_temperature, stat.avg_hours_without_precipitation
            );
            Ok(Some(stat))
        }
        Err(Error::NoTemperatureData { city })
            if policy == MissingTemperaturePolicy::SkipCity =>
        {
            warn!("No daytime temperature for {}, skipping", city);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

// -- Tests -------------------------------------------------------------------
