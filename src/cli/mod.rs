//! Command-line entry points.
//!
//! Bare `souk` runs the TUI. The subcommands are headless equivalents of
//! the screens for scripting and tests.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::router::{Navigator, Screen};
use crate::{logging, tui};

#[derive(Parser)]
#[command(
    name = "souk",
    version,
    about = "Terminal client for the Souk catalog service"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session token
    Logout,
    /// List catalog categories
    Categories,
    /// Show the resolved configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Parses arguments and dispatches.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init()?;
    let config = Config::load()?;

    match cli.command {
        None => tui::run(&config),
        Some(Command::Login { username, password }) => {
            block_on(commands::login::run(&config, &username, &password))
        }
        Some(Command::Logout) => commands::logout::run(&config),
        Some(Command::Categories) => block_on(commands::categories::run(&config)),
        Some(Command::Config { init }) => commands::config::run(&config, init),
    }
}

fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(future)
}

/// Headless commands have no screen stack; transitions are only logged.
pub(crate) struct DiscardNavigator;

impl Navigator for DiscardNavigator {
    fn navigate(&mut self, to: Screen) {
        tracing::debug!(to = ?to.id(), "navigation (headless)");
    }

    fn reset_to(&mut self, to: Screen) {
        tracing::debug!(to = ?to.id(), "stack reset (headless)");
    }
}
