//! TUI state: screen stack, form contents, request liveness.

use crate::api::Category;
use crate::geo::Coordinates;
use crate::router::{Screen, ScreenId};

/// Cities offered by the profile-completion picker.
pub const CITIES: &[&str] = &["FES"];

// ============================================================================
// Request liveness
// ============================================================================

/// Opaque request id for matching async results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Tracks the latest active request and ignores stale results.
///
/// Screens are switched away from while a request is outstanding; the
/// completion still arrives, and this guard is what keeps it from mutating
/// whatever screen is showing by then.
#[derive(Debug, Default)]
pub struct LatestOnly {
    next: u64,
    active: Option<RequestId>,
}

impl LatestOnly {
    /// Start a new request and mark it as active.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        self.active = Some(id);
        id
    }

    /// Cancel any active request.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Returns true if any request is active.
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Finish the request if it's still active.
    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

/// Per-screen submission state: `Idle -> Submitting -> {Idle, Failed}`.
///
/// `Submitting` makes the submit key inert; `Failed` keeps the last message
/// until the next submission attempt clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

impl SubmitState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One text input.
#[derive(Debug, Clone)]
pub struct TextField {
    /// Message key for the field label.
    pub label: &'static str,
    pub value: String,
    /// Render the value masked.
    pub secret: bool,
    /// Hard input length cap (OTP field), None for unlimited.
    pub max_len: Option<usize>,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            secret: false,
            max_len: None,
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::new(label)
        }
    }

    pub fn with_max_len(label: &'static str, max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Self::new(label)
        }
    }
}

/// A column of text fields with one focused.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
    pub submit: SubmitState,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self {
            fields,
            focus: 0,
            submit: SubmitState::default(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn insert(&mut self, c: char) {
        let field = &mut self.fields[self.focus];
        if field.max_len.is_some_and(|max| field.value.chars().count() >= max) {
            return;
        }
        field.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].value.pop();
    }

    pub fn value(&self, index: usize) -> &str {
        &self.fields[index].value
    }
}

// ============================================================================
// Screens
// ============================================================================

/// Profile-completion screen state.
///
/// Focus walks the two text fields, then the city picker.
#[derive(Debug)]
pub struct AdditionalInfoState {
    pub user_id: String,
    /// username, phoneNumber
    pub form: Form,
    /// Index into [`CITIES`]; None until the user picks one.
    pub city: Option<usize>,
    /// True when focus sits on the city picker instead of a text field.
    pub picker_focused: bool,
    /// Resolved once on screen entry; None reproduces the
    /// location-unavailable failure on submit.
    pub location: Option<Coordinates>,
}

impl AdditionalInfoState {
    pub fn new(user_id: String, location: Option<Coordinates>) -> Self {
        Self {
            user_id,
            form: Form::new(vec![
                TextField::new("username"),
                TextField::new("phoneNumber"),
            ]),
            city: None,
            picker_focused: false,
            location,
        }
    }

    pub fn selected_city(&self) -> &str {
        self.city.map_or("", |index| CITIES[index])
    }

    /// Cycles the picker selection.
    pub fn cycle_city(&mut self, forward: bool) {
        let len = CITIES.len();
        self.city = Some(match self.city {
            None => 0,
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
        });
    }
}

/// Category-listing screen state.
#[derive(Debug, Default)]
pub struct HomeState {
    pub loading: bool,
    pub categories: Vec<Category>,
    pub error: Option<String>,
    /// Logout confirmation prompt showing.
    pub confirm_logout: bool,
}

/// The active screen with its local state.
#[derive(Debug)]
pub enum ScreenState {
    /// Bootstrap still running.
    Splash,
    /// username, password
    Login(Form),
    /// email, password, confirmPassword
    Signup(Form),
    AdditionalInfo(AdditionalInfoState),
    /// email
    Reset(Form),
    /// otp, newPassword (email carried from the request screen)
    ResetOtp { email: String, form: Form },
    Home(HomeState),
}

impl ScreenState {
    /// Builds the entry state for a navigation target.
    pub fn enter(screen: Screen, location: Option<Coordinates>) -> Self {
        match screen {
            Screen::Login => ScreenState::Login(Form::new(vec![
                TextField::new("username"),
                TextField::secret("password"),
            ])),
            Screen::Signup => ScreenState::Signup(Form::new(vec![
                TextField::new("email"),
                TextField::secret("password"),
                TextField::secret("confirmPassword"),
            ])),
            Screen::AdditionalInfo { user_id } => {
                ScreenState::AdditionalInfo(AdditionalInfoState::new(user_id, location))
            }
            Screen::Reset => ScreenState::Reset(Form::new(vec![TextField::new("email")])),
            Screen::ResetOtpConfirm { email } => ScreenState::ResetOtp {
                email,
                form: Form::new(vec![
                    TextField::with_max_len("otp", 6),
                    TextField::secret("newPassword"),
                ]),
            },
            Screen::Home => ScreenState::Home(HomeState {
                loading: true,
                ..HomeState::default()
            }),
        }
    }

    /// The router identity of this screen, None while on the splash.
    pub fn id(&self) -> Option<ScreenId> {
        match self {
            ScreenState::Splash => None,
            ScreenState::Login(_) => Some(ScreenId::Login),
            ScreenState::Signup(_) => Some(ScreenId::Signup),
            ScreenState::AdditionalInfo(_) => Some(ScreenId::AdditionalInfo),
            ScreenState::Reset(_) => Some(ScreenId::Reset),
            ScreenState::ResetOtp { .. } => Some(ScreenId::ResetOtpConfirm),
            ScreenState::Home(_) => Some(ScreenId::Home),
        }
    }

    /// The active form, if this screen has one.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match self {
            ScreenState::Login(form)
            | ScreenState::Signup(form)
            | ScreenState::Reset(form)
            | ScreenState::ResetOtp { form, .. } => Some(form),
            ScreenState::AdditionalInfo(info) => Some(&mut info.form),
            _ => None,
        }
    }
}

/// Top-level TUI state.
#[derive(Debug)]
pub struct AppState {
    pub screen: ScreenState,
    pub requests: LatestOnly,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: ScreenState::Splash,
            requests: LatestOnly::default(),
            should_quit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_only_drops_stale_results() {
        let mut requests = LatestOnly::default();
        let first = requests.begin();
        let second = requests.begin();

        assert!(!requests.finish_if_active(first));
        assert!(requests.finish_if_active(second));
        assert!(!requests.has_active());
    }

    #[test]
    fn test_latest_only_cancel() {
        let mut requests = LatestOnly::default();
        let id = requests.begin();
        requests.cancel();
        assert!(!requests.finish_if_active(id));
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut form = Form::new(vec![TextField::new("a"), TextField::new("b")]);
        assert_eq!(form.focus, 0);
        form.focus_next();
        assert_eq!(form.focus, 1);
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_prev();
        assert_eq!(form.focus, 1);
    }

    #[test]
    fn test_otp_field_caps_length() {
        let mut form = Form::new(vec![TextField::with_max_len("otp", 6)]);
        for c in "1234567".chars() {
            form.insert(c);
        }
        assert_eq!(form.value(0), "123456");
    }

    #[test]
    fn test_city_picker_cycles() {
        let mut info = AdditionalInfoState::new("u-1".to_string(), None);
        assert_eq!(info.selected_city(), "");
        info.cycle_city(true);
        assert_eq!(info.selected_city(), "FES");
        info.cycle_city(true);
        assert_eq!(info.selected_city(), "FES");
    }
}
