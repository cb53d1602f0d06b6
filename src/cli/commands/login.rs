//! Headless login.

use anyhow::Result;

use crate::api::ApiClient;
use crate::cli::DiscardNavigator;
use crate::config::Config;
use crate::flows::AuthFlow;
use crate::i18n::Messages;
use crate::session::{FileTokenStore, TokenStore};

pub async fn run(config: &Config, username: &str, password: &str) -> Result<()> {
    let messages = Messages::load(&config.language);
    let api = ApiClient::new(config.resolve_base_url()?);
    let store = FileTokenStore::open_default();

    // Same one-token invariant as the TUI: a fresh login replaces any
    // token already on disk.
    let had_token = store.read().is_some();

    let flow = AuthFlow::new(&api, &store, &messages);
    let mut nav = DiscardNavigator;
    flow.login(&mut nav, username, password)
        .await
        .map_err(|err| anyhow::anyhow!(err.message))?;

    if had_token {
        println!("✓ Logged in (previous token replaced)");
    } else {
        println!("✓ Logged in");
    }
    println!("  Token saved to: {}", store.path().display());
    Ok(())
}
