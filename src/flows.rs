//! Auth flow controller.
//!
//! One method per screen action. Each validates its inputs client-side
//! (short-circuiting on the first failure, in the order the screens check
//! them), then makes the one network call, then writes the token store
//! and signals a navigation transition on success. Failures come back as
//! a single user-facing message for the screen to render inline.

use crate::api::{ApiClient, ApiError, ApiResult, ProfileUpdate};
use crate::geo::Coordinates;
use crate::i18n::Messages;
use crate::router::{Navigator, Screen};
use crate::session::TokenStore;
use crate::validate;

/// A flow failure, carrying the localized message to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
    pub message: String,
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FlowError {}

/// Result type for flow operations.
pub type FlowResult = Result<(), FlowError>;

/// Maps an API failure to its user-facing message: the server-provided
/// message when the body carried one, the per-operation fallback otherwise,
/// and the generic network message for transport failures.
pub fn user_message(messages: &Messages, err: &ApiError, fallback_key: &str) -> String {
    match err {
        ApiError::Http {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::Http { .. } => messages.get(fallback_key).to_string(),
        ApiError::Network(_) => messages.get("networkError").to_string(),
    }
}

/// The auth flows, over injected API, storage and message table.
pub struct AuthFlow<'a> {
    api: &'a ApiClient,
    store: &'a dyn TokenStore,
    messages: &'a Messages,
}

impl<'a> AuthFlow<'a> {
    pub fn new(api: &'a ApiClient, store: &'a dyn TokenStore, messages: &'a Messages) -> Self {
        Self {
            api,
            store,
            messages,
        }
    }

    /// Logs in with username/password credentials.
    ///
    /// The only client-side check is non-emptiness; shapes are the
    /// server's concern here.
    pub async fn login(
        &self,
        nav: &mut dyn Navigator,
        username: &str,
        password: &str,
    ) -> FlowResult {
        if username.trim().is_empty() || password.is_empty() {
            return self.fail("missingCredentials");
        }

        let token = self.describe(self.api.login(username, password).await, "loginFailed")?;
        self.store_token(&token)?;

        tracing::info!(username, "logged in");
        nav.navigate(Screen::Home);
        Ok(())
    }

    /// First signup phase: credentials only. Success yields a pending user
    /// id and moves on to profile completion.
    pub async fn initial_signup(
        &self,
        nav: &mut dyn Navigator,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> FlowResult {
        if !validate::email_is_valid(email) {
            return self.fail("invalidEmail");
        }
        if !validate::password_is_strong(password) {
            return self.fail("invalidPassword");
        }
        if password != confirm_password {
            return self.fail("passwordsDontMatch");
        }

        let user_id = self.describe(
            self.api.initial_signup(email, password).await,
            "signupFailed",
        )?;
        if user_id.trim().is_empty() {
            return self.fail("userIdNotProvided");
        }

        tracing::info!(email, "signup accepted, awaiting profile");
        nav.navigate(Screen::AdditionalInfo { user_id });
        Ok(())
    }

    /// Second signup phase: profile fields for the pending user.
    pub async fn complete_profile(
        &self,
        nav: &mut dyn Navigator,
        user_id: &str,
        username: &str,
        phone_number: &str,
        city: &str,
        location: Option<Coordinates>,
    ) -> FlowResult {
        if !validate::username_is_valid(username) {
            return self.fail("invalidUsername");
        }
        if !validate::phone_is_valid(phone_number) {
            return self.fail("invalidPhoneNumber");
        }
        if city.is_empty() {
            return self.fail("selectCity");
        }
        let Some(coordinates) = location else {
            return self.fail("locationError");
        };

        let profile = ProfileUpdate {
            id: user_id,
            username,
            city,
            phone_number,
            location: coordinates.to_string(),
        };
        let token = self.describe(
            self.api.update_profile(&profile).await,
            "updateProfileFailed",
        )?;
        self.store_token(&token)?;

        tracing::info!(username, "profile completed");
        nav.navigate(Screen::Home);
        Ok(())
    }

    /// First reset phase: ask the server to send a one-time code.
    ///
    /// The OTP endpoints answer with bare statuses, so failures map to
    /// fixed messages rather than a server-provided one.
    pub async fn request_password_reset(&self, nav: &mut dyn Navigator, email: &str) -> FlowResult {
        if !validate::email_is_valid(email) {
            return self.fail("invalidEmail");
        }

        match self.api.request_otp(email).await {
            Ok(()) => {
                tracing::info!("password reset code requested");
                nav.navigate(Screen::ResetOtpConfirm {
                    email: email.to_string(),
                });
                Ok(())
            }
            Err(ApiError::Http { status, .. }) => {
                tracing::warn!(status, "otp request rejected");
                self.fail("somethingWentWrong")
            }
            Err(err) => self.network_fail(&err),
        }
    }

    /// Second reset phase: submit the code and the new password.
    pub async fn confirm_password_reset(
        &self,
        nav: &mut dyn Navigator,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> FlowResult {
        if !validate::password_is_strong(new_password) {
            return self.fail("invalidPassword");
        }

        match self.api.verify_otp(email, otp, new_password).await {
            Ok(()) => {
                tracing::info!("password reset confirmed");
                nav.navigate(Screen::Login);
                Ok(())
            }
            Err(ApiError::Http { status, .. }) => {
                tracing::warn!(status, "otp verification rejected");
                self.fail("wrongOTP")
            }
            Err(err) => self.network_fail(&err),
        }
    }

    /// Clears the stored token and resets the stack to Login.
    pub fn logout(&self, nav: &mut dyn Navigator) -> FlowResult {
        match self.store.clear() {
            Ok(had_token) => {
                tracing::info!(had_token, "logged out");
                nav.reset_to(Screen::Login);
                Ok(())
            }
            Err(err) => {
                tracing::error!(%err, "failed to clear token store");
                self.fail("somethingWentWrong")
            }
        }
    }

    fn store_token(&self, token: &str) -> FlowResult {
        self.store.write(token).map_err(|err| {
            tracing::error!(%err, "failed to persist token");
            FlowError {
                message: self.messages.get("somethingWentWrong").to_string(),
            }
        })
    }

    fn describe<T>(&self, result: ApiResult<T>, fallback_key: &str) -> Result<T, FlowError> {
        result.map_err(|err| {
            match &err {
                ApiError::Http { status, .. } => tracing::warn!(status, "request rejected"),
                ApiError::Network(err) => tracing::warn!(%err, "transport failure"),
            }
            FlowError {
                message: user_message(self.messages, &err, fallback_key),
            }
        })
    }

    fn fail(&self, key: &str) -> FlowResult {
        Err(FlowError {
            message: self.messages.get(key).to_string(),
        })
    }

    fn network_fail(&self, err: &ApiError) -> FlowResult {
        tracing::warn!(%err, "transport failure");
        self.fail("networkError")
    }
}
