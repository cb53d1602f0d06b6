//! TUI runtime: terminal lifecycle and the event loop.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::bootstrap;
use crate::config::Config;
use crate::geo::ConfigLocation;
use crate::i18n::Messages;
use crate::session::{FileTokenStore, TokenStore};
use crate::tui::events::UiEvent;
use crate::tui::state::AppState;
use crate::tui::{Ctx, render, update};

/// Runs the TUI until quit.
pub fn run(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_inner(config))
}

async fn run_inner(config: &Config) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open_default());
    let ctx = Ctx {
        api: ApiClient::new(config.resolve_base_url()?),
        store: Arc::clone(&store),
        messages: Arc::new(Messages::load(&config.language)),
        location: ConfigLocation::new(config.coordinates()),
        tx: tx.clone(),
    };

    // Bootstrap: read the store and hold the splash for its minimum.
    {
        let tx = tx.clone();
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let route = bootstrap::run(store.as_ref()).await;
            let _ = tx.send(UiEvent::BootstrapDone(route));
        });
    }

    // Terminal input drains on a blocking thread into the same inbox.
    {
        let tx = tx.clone();
        std::thread::spawn(move || {
            loop {
                match crossterm::event::read() {
                    Ok(event) => {
                        if tx.send(UiEvent::Terminal(event)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::error!(%err, "terminal read failed");
                        break;
                    }
                }
            }
        });
    }

    let mut terminal = ratatui::init();
    let mut state = AppState::new();

    let result = loop {
        if let Err(err) = terminal.draw(|frame| render::draw(frame, &state, &ctx.messages)) {
            break Err(err.into());
        }

        let Some(event) = rx.recv().await else {
            break Ok(());
        };
        update::handle(&mut state, &ctx, event);

        // Drain whatever else is queued before paying for a redraw.
        while let Ok(event) = rx.try_recv() {
            update::handle(&mut state, &ctx, event);
        }

        if state.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    result
}
