//! Config inspection.

use anyhow::Result;

use crate::config::{self, Config};
use crate::paths;

pub fn run(config: &Config, init: bool) -> Result<()> {
    if init {
        if config::ensure_config_file()? {
            println!("✓ Wrote {}", paths::config_path().display());
        } else {
            println!("Config already exists at {}", paths::config_path().display());
        }
    }

    println!("config:   {}", paths::config_path().display());
    println!("base_url: {}", config.resolve_base_url()?);
    println!("language: {}", config.language);
    match config.coordinates() {
        Some(coords) => println!("location: {coords}"),
        None => println!("location: (not set)"),
    }

    Ok(())
}
