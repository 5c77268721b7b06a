//! Pipeline configuration.
//!
//! Everything the pipeline would otherwise read from globals (store location,
//! pool sizes, provider timeout, the missing-temperature policy) is carried
//! here and handed to each stage explicitly.

use std::{path::PathBuf, time::Duration};

use tracing::debug;

use crate::error::{Error, Result};

/// File name of the store when no location is given.
pub const DEFAULT_STORE_FILE_NAME: &str = "cityrank.json";

/// Upper bound on the default fetch pool size.
const MAX_DEFAULT_FETCH_WORKERS: usize = 32;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What to do with a city whose forecast has no daytime temperature at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTemperaturePolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log and drop the city, as for a failed fetch.
    SkipCity,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Location of the durable store, overwritten each run
    pub store_path: PathBuf,

    /// Concurrent provider requests
    pub fetch_workers: usize,

    /// Threads in the statistics pool
    pub compute_workers: usize,

    /// Per-request timeout for the provider
    pub request_timeout: Duration,

    pub missing_temperature: MissingTemperaturePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let cpu_cores = num_cpus::get();

        Self {
            store_path: default_store_path(),
            fetch_workers: (cpu_cores + 4).min(MAX_DEFAULT_FETCH_WORKERS),
            compute_workers: cpu_cores,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            missing_temperature: MissingTemperaturePolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration writing the store to `store_path`.
    pub fn with_store_path(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch_workers == 0 {
            return Err(Error::configuration("fetch_workers must be at least 1"));
        }
        if self.compute_workers == 0 {
            return Err(Error::configuration("compute_workers must be at least 1"));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::configuration("request timeout must be non-zero"));
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(Error::configuration("store path must not be empty"));
        }

        debug!(
            "Configuration valid: {} fetch workers, {} compute workers, store {}",
            self.fetch_workers,
            self.compute_workers,
            self.store_path.display()
        );
        Ok(())
    }
}

/// `~/cityrank.json`, or the working directory when there is no home.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_STORE_FILE_NAME)
}

// -- Tests -------------------------------------------------------------------
