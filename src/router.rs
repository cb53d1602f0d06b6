//! Screen graph and navigation seam.
//!
//! Navigation is a fixed directed graph over six named screens. Edges fire
//! only on explicit user action or a successful auth flow; the single
//! automatic decision is the bootstrap route. Screens whose edges carry a
//! parameter embed it in the [`Screen`] value itself, so a transition
//! without its parameter cannot be expressed.

/// Screen identity, without edge parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Login,
    Signup,
    AdditionalInfo,
    Reset,
    ResetOtpConfirm,
    Home,
}

/// A navigation target, parameters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    /// Profile completion for a pending signup.
    AdditionalInfo { user_id: String },
    Reset,
    /// OTP entry for the password reset requested for `email`.
    ResetOtpConfirm { email: String },
    Home,
}

impl Screen {
    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Login => ScreenId::Login,
            Screen::Signup => ScreenId::Signup,
            Screen::AdditionalInfo { .. } => ScreenId::AdditionalInfo,
            Screen::Reset => ScreenId::Reset,
            Screen::ResetOtpConfirm { .. } => ScreenId::ResetOtpConfirm,
            Screen::Home => ScreenId::Home,
        }
    }
}

/// Returns true when the graph has an edge `from -> to`.
pub fn edge_allowed(from: ScreenId, to: ScreenId) -> bool {
    use ScreenId::{AdditionalInfo, Home, Login, Reset, ResetOtpConfirm, Signup};

    matches!(
        (from, to),
        (Login, Signup | Reset | Home)
            | (Signup, Login | AdditionalInfo)
            | (AdditionalInfo, Home)
            | (Reset, Login | ResetOtpConfirm)
            | (ResetOtpConfirm, Login)
            | (Home, Login)
    )
}

/// Receiver of navigation transitions.
///
/// Flow controllers are handed a navigator instead of touching a global
/// navigation object, so tests can record transitions.
pub trait Navigator: Send {
    /// Follows an edge to `to`.
    fn navigate(&mut self, to: Screen);

    /// Replaces the stack with `to` (bootstrap decision, logout).
    fn reset_to(&mut self, to: Screen);
}

/// Navigator that records calls, for tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub navigations: Vec<Screen>,
    pub resets: Vec<Screen>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, to: Screen) {
        self.navigations.push(to);
    }

    fn reset_to(&mut self, to: Screen) {
        self.resets.push(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_out_of_login() {
        assert!(edge_allowed(ScreenId::Login, ScreenId::Signup));
        assert!(edge_allowed(ScreenId::Login, ScreenId::Reset));
        assert!(edge_allowed(ScreenId::Login, ScreenId::Home));
        assert!(!edge_allowed(ScreenId::Login, ScreenId::AdditionalInfo));
        assert!(!edge_allowed(ScreenId::Login, ScreenId::ResetOtpConfirm));
    }

    #[test]
    fn test_signup_chain() {
        assert!(edge_allowed(ScreenId::Signup, ScreenId::AdditionalInfo));
        assert!(edge_allowed(ScreenId::AdditionalInfo, ScreenId::Home));
        // Profile completion cannot be skipped back into.
        assert!(!edge_allowed(ScreenId::Home, ScreenId::AdditionalInfo));
    }

    #[test]
    fn test_reset_chain_ends_at_login() {
        assert!(edge_allowed(ScreenId::Reset, ScreenId::ResetOtpConfirm));
        assert!(edge_allowed(ScreenId::ResetOtpConfirm, ScreenId::Login));
        assert!(!edge_allowed(ScreenId::ResetOtpConfirm, ScreenId::Home));
    }

    #[test]
    fn test_no_self_edges() {
        for id in [
            ScreenId::Login,
            ScreenId::Signup,
            ScreenId::AdditionalInfo,
            ScreenId::Reset,
            ScreenId::ResetOtpConfirm,
            ScreenId::Home,
        ] {
            assert!(!edge_allowed(id, id));
        }
    }

    #[test]
    fn test_screen_ids_carry_parameters() {
        let screen = Screen::AdditionalInfo {
            user_id: "u-1".to_string(),
        };
        assert_eq!(screen.id(), ScreenId::AdditionalInfo);

        let screen = Screen::ResetOtpConfirm {
            email: "a@b.c".to_string(),
        };
        assert_eq!(screen.id(), ScreenId::ResetOtpConfirm);
    }
}
