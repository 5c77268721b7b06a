pub mod cities;
pub mod rank;

use std::path::Path;

use anyhow::Result;
pub use cities::cities;
pub use rank::rank;

use crate::registry::{default_registry, CityRegistry};

/// The registry in `path`, or the built-in cities.
pub fn load_registry(path: Option<&Path>) -> Result<CityRegistry> {
    match path {
        Some(path) => Ok(CityRegistry::from_file(path)?),
        None => Ok(default_registry()),
    }
}
