use std::sync::Arc;

use anyhow::{Context, Result};

use super::load_registry;
use crate::{cli::RankArgs, client::HttpForecastClient, forecast::RankedResult, pipeline};

/// Runs the whole pipeline and returns the location of the saved ranking.
pub async fn rank(args: &RankArgs) -> Result<String> {
    let registry = Arc::new(load_registry(args.cities.as_deref())?);
    let config = args.to_config();

    let client = HttpForecastClient::new(Arc::clone(&registry), config.request_timeout)
        .context("Failed to build forecast client")?;

    let ranked = pipeline::run(&client, &registry, &config).await?;
    print_ranking(&ranked);

    Ok(config.store_path.to_string_lossy().to_string())
}

fn print_ranking(ranked: &RankedResult) {
    if ranked.is_empty() {
        println!("No city could be ranked");
        return;
    }

    for city in ranked.by_rank() {
        println!(
            "{:>3}. {:<16} {:>7.2} °C {:>6.2} dry hours",
            city.rating.unwrap_or_default(),
            city.city,
            city.avg_temperature,
            city.avg_hours_without_precipitation
        );
    }
}
