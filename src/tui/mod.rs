//! Terminal UI.
//!
//! One screen per step of the auth lifecycle, plus the category listing.
//! Follows the event/state/update/render split: a single inbox feeds the
//! reducer, and flow tasks report back through it.

pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod update;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::geo::ConfigLocation;
use crate::i18n::Messages;
use crate::session::TokenStore;
use events::UiEvent;

/// Shared handles the reducer needs to spawn flow work.
pub struct Ctx {
    pub api: ApiClient,
    pub store: Arc<dyn TokenStore>,
    pub messages: Arc<Messages>,
    pub location: ConfigLocation,
    pub tx: mpsc::UnboundedSender<UiEvent>,
}

pub use runtime::run;
