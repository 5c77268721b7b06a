//! Forecast provider client.

use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::StatusCode;
use tracing::debug;

use crate::{forecast::RawForecast, registry::CityRegistry};

/// Why a single city's forecast could not be obtained.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("City '{0}' is not in the registry")]
    UnknownCity(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider answered {0}")]
    Status(StatusCode),

    #[error("Malformed forecast: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of raw forecasts, one call per city.
pub trait ForecastClient: Send + Sync {
    fn fetch<'a>(&'a self, city: &'a str) -> BoxFuture<'a, Result<RawForecast, ClientError>>;
}

/// Fetches forecasts over HTTP from the URLs in a [`CityRegistry`].
pub struct HttpForecastClient {
    client: reqwest::Client,
    registry: Arc<CityRegistry>,
}

impl HttpForecastClient {
    pub fn new(registry: Arc<CityRegistry>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(HttpForecastClient { client, registry })
    }

    async fn get_forecast(&self, city: &str) -> Result<RawForecast, ClientError> {
        let url = self
            .registry
            .url_for(city)
            .ok_or_else(|| ClientError::UnknownCity(city.to_string()))?;

        debug!("Requesting forecast for {} from {}", city, url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let body = response.bytes().await?;
        let forecast = RawForecast::from_slice(city, &body)?;

        Ok(forecast)
    }
}

impl ForecastClient for HttpForecastClient {
    fn fetch<'a>(&'a self, city: &'a str) -> BoxFuture<'a, Result<RawForecast, ClientError>> {
        Box::pin(self.get_forecast(city))
    }
}

// -- Tests -------------------------------------------------------------------
