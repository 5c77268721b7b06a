use std::path::PathBuf;

use anyhow::Result;

use super::load_registry;

pub fn cities(path: Option<&PathBuf>) -> Result<()> {
    let registry = load_registry(path.map(PathBuf::as_path))?;

    for (name, url) in registry.iter() {
        println!("{:<16} {}", name, url);
    }
    println!("{} cities", registry.len());

    Ok(())
}
