//! Headless logout.

use anyhow::Result;

use crate::config::Config;
use crate::session::{FileTokenStore, TokenStore};

pub fn run(_config: &Config) -> Result<()> {
    let store = FileTokenStore::open_default();
    let had_token = store.clear()?;

    if had_token {
        println!("✓ Logged out");
        println!("  Token removed from: {}", store.path().display());
    } else {
        println!("Not logged in (no token found).");
    }

    Ok(())
}
