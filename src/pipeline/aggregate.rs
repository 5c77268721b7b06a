//! Aggregation stage: the single consumer of the hand-off queue.

use std::path::Path;

use tracing::info;

use super::handoff::Consumer;
use crate::{error::Result, store::write_store};

/// Drains the queue until every producer has finished, then replaces the
/// store with the collected records. Returns the number of records written.
pub async fn aggregate(consumer: Consumer, store_path: &Path) -> Result<usize> {
    let cities = consumer.drain().await;
    info!("Collected {} city records from the queue", cities.len());

    write_store(store_path, &cities)?;
    info!(
        "Wrote {} records to {}",
        cities.len(),
        store_path.display()
    );

    Ok(cities.len())
}

// -- Tests -------------------------------------------------------------------
