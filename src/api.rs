//! HTTP client for the catalog backend.
//!
//! One-shot requests only: no retries, no timeout tuning, no cancellation.
//! Whether a request carries the session token is decided per endpoint;
//! only the category listing is authenticated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DEFAULT_BASE_URL;

/// A server-defined catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Errors surfaced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed before a status line was read.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status. `message` holds the
    /// JSON body's `message` field when one was present.
    #[error("HTTP {status}")]
    Http { status: u16, message: Option<String> },
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Fields of the profile-completion request.
#[derive(Debug, Serialize)]
pub struct ProfileUpdate<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub city: &'a str,
    #[serde(rename = "phoneNumber")]
    pub phone_number: &'a str,
    /// `"lat,lng"`.
    pub location: String,
}

/// Client for the catalog backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against the given base URL (no trailing slash).
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is the
    ///   production endpoint.
    /// - At runtime, panics if `SOUK_BLOCK_REAL_API=1` and `base_url` is the
    ///   production endpoint.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Point SOUK_BASE_URL at a mock server instead.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();

        // Compile-time guard for unit tests
        #[cfg(test)]
        assert_ne!(
            base_url, DEFAULT_BASE_URL,
            "Tests must not use the production endpoint; point SOUK_BASE_URL at a mock server."
        );

        // Runtime guard for integration tests (set SOUK_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        assert!(
            !(std::env::var("SOUK_BLOCK_REAL_API").is_ok_and(|v| v == "1")
                && base_url == DEFAULT_BASE_URL),
            "SOUK_BLOCK_REAL_API=1 but trying to use the production endpoint"
        );

        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/login?username=&password=` - returns the session token.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .query(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(ApiError::Network)?;

        read_text(response).await
    }

    /// `POST /auth/initialSignup` - returns the pending user id.
    pub async fn initial_signup(&self, email: &str, password: &str) -> ApiResult<String> {
        let response = self
            .http
            .post(format!("{}/auth/initialSignup", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ApiError::Network)?;

        read_text(response).await
    }

    /// `POST /auth/updateProfile` - returns the session token.
    pub async fn update_profile(&self, profile: &ProfileUpdate<'_>) -> ApiResult<String> {
        let response = self
            .http
            .post(format!("{}/auth/updateProfile", self.base_url))
            .json(profile)
            .send()
            .await
            .map_err(ApiError::Network)?;

        read_text(response).await
    }

    /// `POST /auth/otp-request` - body is the raw lowercase email.
    pub async fn request_otp(&self, email: &str) -> ApiResult<()> {
        let response = self
            .http
            .post(format!("{}/auth/otp-request", self.base_url))
            .body(email.to_lowercase())
            .send()
            .await
            .map_err(ApiError::Network)?;

        check_status(response).await.map(|_| ())
    }

    /// `POST /auth/otp-verify?email=&otp=` - body is the raw new password.
    pub async fn verify_otp(&self, email: &str, otp: &str, new_password: &str) -> ApiResult<()> {
        let response = self
            .http
            .post(format!("{}/auth/otp-verify", self.base_url))
            .query(&[("email", email), ("otp", otp)])
            .body(new_password.to_string())
            .send()
            .await
            .map_err(ApiError::Network)?;

        check_status(response).await.map(|_| ())
    }

    /// `GET /categories` with bearer attachment when a token is supplied.
    pub async fn categories(&self, token: Option<&str>) -> ApiResult<Vec<Category>> {
        let mut request = self.http.get(format!("{}/categories", self.base_url));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::Network)?;
        let response = check_status(response).await?;

        response.json().await.map_err(ApiError::Network)
    }
}

/// Rejects non-success responses, extracting the server message if any.
async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}

/// Reads a success body as text (tokens and pending ids come back raw).
async fn read_text(response: reqwest::Response) -> ApiResult<String> {
    let response = check_status(response).await?;
    response.text().await.map_err(ApiError::Network)
}

/// Pulls the `message` field out of a JSON error body, when present.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}
