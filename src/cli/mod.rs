//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{MissingTemperaturePolicy, PipelineConfig};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output from every stage
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch forecasts, rank the cities and save the ranking
    Rank(RankArgs),
    /// List the cities that would be ranked
    Cities {
        /// JSON file mapping city names to forecast URLs
        #[arg(long)]
        cities: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RankArgs {
    /// Where to write the ranking [default: ~/cityrank.json]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file mapping city names to forecast URLs
    #[arg(long)]
    pub cities: Option<PathBuf>,

    /// Concurrent forecast requests
    #[arg(long)]
    pub fetch_workers: Option<usize>,

    /// Threads computing statistics
    #[arg(long)]
    pub compute_workers: Option<usize>,

    /// Forecast request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Drop cities without daytime temperatures instead of failing
    #[arg(long)]
    pub skip_cities_without_temperature: bool,
}

impl RankArgs {
    /// Applies the given options over the default configuration.
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = match &self.output {
            Some(output) => PipelineConfig::with_store_path(output),
            None => PipelineConfig::default(),
        };

        if let Some(workers) = self.fetch_workers {
            config.fetch_workers = workers;
        }
        if let Some(workers) = self.compute_workers {
            config.compute_workers = workers;
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        if self.skip_cities_without_temperature {
            config.missing_temperature = MissingTemperaturePolicy::SkipCity;
        }

        config
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    )
}

// -- Tests -------------------------------------------------------------------
