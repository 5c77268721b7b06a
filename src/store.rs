//! Durable store: a JSON array of city records, replaced wholesale on write.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    error::{Error, Result},
    forecast::CityStat,
};

/// Reads every record in the store, in stored order.
pub fn read_store(path: &Path) -> Result<Vec<CityStat>> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open store {}", path.display()), e))?;

    let cities: Vec<CityStat> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::json(path, e))?;
    debug!("Read {} records from {}", cities.len(), path.display());

    Ok(cities)
}

/// Replaces the store content with `cities`.
///
/// The document is written to a sibling temporary file and renamed over the
/// store, so a failed write leaves the previous content in place.
pub fn write_store(path: &Path, cities: &[CityStat]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|e| Error::io(format!("Failed to create {}", dir.display()), e))?;

    let tmp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(format!("Failed to create temporary file in {}", dir.display()), e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file());
        let mut serializer =
            Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        cities
            .serialize(&mut serializer)
            .map_err(|e| Error::json(path, e))?;
        writer
            .flush()
            .map_err(|e| Error::io(format!("Failed to write store {}", path.display()), e))?;
    }

    tmp.persist(path).map_err(|e| {
        Error::io(format!("Failed to replace store {}", path.display()), e.error)
    })?;
    debug!("Wrote {} records to {}", cities.len(), path.display());

    Ok(())
}

// -- Tests -------------------------------------------------------------------
