//! The four-stage ranking pipeline.
//!
//! Stages run strictly one after another:
//!
//! 1. [`fetch`]: one provider request per city, bounded concurrency.
//! 2. [`compute`]: statistics per city on a CPU pool, pushed onto the
//!    [`handoff`] queue.
//! 3. [`aggregate`]: the single queue consumer, writes the store.
//! 4. [`analyze`]: ranks the stored cities and rewrites the store.

pub mod aggregate;
pub mod analyze;
pub mod compute;
pub mod fetch;
pub mod handoff;

#[cfg(test)]
pub(crate) mod testing;

use tracing::{info, warn};

use crate::{
    cli::{create_progress_bar, create_spinner},
    client::ForecastClient,
    config::PipelineConfig,
    error::Result,
    forecast::RankedResult,
    registry::CityRegistry,
};

/// Runs every stage for all cities in `registry` and returns the ranking
/// that was persisted at `config.store_path`.
pub async fn run<C>(
    client: &C,
    registry: &CityRegistry,
    config: &PipelineConfig,
) -> Result<RankedResult>
where
    C: ForecastClient + ?Sized,
{
    config.validate()?;
    if registry.is_empty() {
        warn!("City registry is empty, the ranking will be empty");
    }
    let cities = registry.cities();

    let bar = create_progress_bar(cities.len() as u64, "Fetching forecasts...".to_string());
    let outcomes = fetch::fetch_all(client, &cities, config.fetch_workers, &bar).await;
    bar.finish_with_message("Forecasts fetched");

    let (producer, consumer) = handoff::channel();

    let bar = create_progress_bar(outcomes.len() as u64, "Computing statistics...".to_string());
    compute::run_compute(
        outcomes,
        producer,
        config.compute_workers,
        config.missing_temperature,
        bar.clone(),
    )
    .await?;
    bar.finish_with_message("Statistics computed");

    let bar = create_spinner("Aggregating results...".to_string());
    let written = aggregate::aggregate(consumer, &config.store_path).await?;
    bar.finish_with_message(format!("{} cities aggregated", written));

    let bar = create_spinner("Ranking cities...".to_string());
    let ranked = analyze::analyze(&config.store_path)?;
    bar.finish_with_message("Cities ranked");

    info!(
        "Ranked {} of {} cities into {}",
        ranked.len(),
        cities.len(),
        config.store_path.display()
    );

    Ok(ranked)
}

// -- Tests -------------------------------------------------------------------
