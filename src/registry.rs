//! City registry: display name to forecast request URL.

use std::{fs, path::Path};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

const FORECAST_ROOT: &str = "https://code.s3.yandex.net/async-module";

const DEFAULT_CITIES: [(&str, &str); 15] = [
    ("MOSCOW", "moscow"),
    ("PARIS", "paris"),
    ("LONDON", "london"),
    ("BERLIN", "berlin"),
    ("BEIJING", "beijing"),
    ("KAZAN", "kazan"),
    ("SPETERSBURG", "spetersburg"),
    ("VOLGOGRAD", "volgograd"),
    ("NOVOSIBIRSK", "novosibirsk"),
    ("KALININGRAD", "kaliningrad"),
    ("ABUDHABI", "abudhabi"),
    ("WARSZAWA", "warszawa"),
    ("BUCHAREST", "bucharest"),
    ("ROMA", "roma"),
    ("CAIRO", "cairo"),
];

/// Read-only mapping of city names to request URLs, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRegistry {
    entries: Vec<(String, String)>,
}

impl CityRegistry {
    pub fn new<N, U>(entries: impl IntoIterator<Item = (N, U)>) -> Self
    where
        N: Into<String>,
        U: Into<String>,
    {
        let mut registry = CityRegistry::default();
        for (name, url) in entries {
            registry.insert(name.into(), url.into());
        }

        registry
    }

    /// Parses a JSON object of `"NAME": "url"` pairs, keeping file order.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: Map<String, Value> = serde_json::from_str(json)
            .map_err(|e| Error::registry(format!("Invalid registry document: {}", e)))?;

        let mut entries = Vec::with_capacity(map.len());
        for (name, url) in map {
            match url {
                Value::String(url) => entries.push((name, url)),
                other => {
                    return Err(Error::registry(format!(
                        "URL for city '{}' must be a string, found {}",
                        name, other
                    )))
                }
            }
        }

        Ok(CityRegistry::new(entries))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read registry {}", path.display()), e)
        })?;

        Self::from_json(&json)
    }

    pub fn url_for(&self, city: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == city)
            .map(|(_, url)| url.as_str())
    }

    pub fn cities(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, url)| (name.as_str(), url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // A later entry for the same name replaces the earlier URL in place.
    fn insert(&mut self, name: String, url: String) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = url,
            None => self.entries.push((name, url)),
        }
    }
}

/// The built-in set of cities.
pub fn default_registry() -> CityRegistry {
    CityRegistry::new(
        DEFAULT_CITIES
            .iter()
            .map(|(name, slug)| (*name, format!("{}/{}-response.json", FORECAST_ROOT, slug))),
    )
}

// -- Tests -------------------------------------------------------------------
