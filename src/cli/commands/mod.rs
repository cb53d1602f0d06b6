//! Subcommand handlers.

pub(crate) mod categories;
pub(crate) mod config;
pub(crate) mod login;
pub(crate) mod logout;
