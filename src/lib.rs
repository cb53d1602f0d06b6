//! Souk client library.
//!
//! This module exports public APIs for testing and extension.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod flows;
pub mod geo;
pub mod i18n;
pub mod logging;
pub mod paths;
pub mod router;
pub mod session;
pub mod tui;
pub mod validate;
