//! UI event types.
//!
//! All external inputs (terminal, bootstrap, async flow results) are
//! converted to [`UiEvent`] before being processed by the reducer. Flow
//! tasks never touch state directly; their navigations and results arrive
//! through the same inbox.

use crossterm::event::Event as CrosstermEvent;
use tokio::sync::mpsc;

use crate::api::Category;
use crate::flows::FlowResult;
use crate::router::{Navigator, Screen};
use crate::tui::state::RequestId;

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Terminal input event (key, resize, paste).
    Terminal(CrosstermEvent),

    /// Bootstrap finished; carries the initial route.
    BootstrapDone(Screen),

    /// A flow task finished. Stale request ids are dropped by the reducer.
    Flow { request: RequestId, result: FlowResult },

    /// A flow asked for a screen transition.
    Navigate(Screen),

    /// A flow asked for a stack reset (bootstrap, logout).
    ResetTo(Screen),

    /// Category fetch completed.
    Categories {
        request: RequestId,
        result: Result<Vec<Category>, String>,
    },
}

/// Navigator feeding transitions into the event inbox.
///
/// Flows run in spawned tasks and cannot hold the UI state; the reducer
/// applies (and edge-checks) the transition when the event drains.
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl ChannelNavigator {
    pub fn new(tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&mut self, to: Screen) {
        let _ = self.tx.send(UiEvent::Navigate(to));
    }

    fn reset_to(&mut self, to: Screen) {
        let _ = self.tx.send(UiEvent::ResetTo(to));
    }
}
