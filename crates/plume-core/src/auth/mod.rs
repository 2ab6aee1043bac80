//! Auth gate over the hosted identity service (GoTrue email/password).
//!
//! The gate is the single source of truth for "is a user logged in": callers
//! subscribe to session changes instead of tracking a login flag themselves.
//! Sign-in, sign-up, and sign-out report errors directly, but success is
//! observed through the subscription.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::config::{is_http_url, normalize_text_option};
use crate::models::session::unix_timestamp_now;
use crate::models::{AuthSession, AuthUser, UserId};

/// Errors surfaced by the auth gate, rendered verbatim as user-visible text.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account with this email already exists")]
    EmailInUse,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Too many attempts, try again later")]
    RateLimited,
    #[error("{0}")]
    Unknown(String),
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Unknown(format!("Failed to parse auth payload: {error}"))
    }
}

/// Result of a sign-up attempt.
///
/// When the identity service requires email confirmation, no session is
/// issued and none is published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn,
    ConfirmationRequired,
}

/// Where sessions survive process restarts (keyring on desktop, in-memory in
/// tests).
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Session persistence that keeps nothing. Sessions last until sign-out or
/// process exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersistence;

impl SessionPersistence for NoPersistence {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        Ok(None)
    }

    fn save_session(&self, _session: &AuthSession) -> AuthResult<()> {
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        Ok(())
    }
}

/// Gate over the hosted identity service.
#[derive(Clone)]
pub struct AuthGate<S: SessionPersistence> {
    auth_url: String,
    anon_key: String,
    client: Client,
    store: S,
    sessions: watch::Sender<Option<AuthSession>>,
}

impl<S: SessionPersistence> AuthGate<S> {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>, store: S) -> AuthResult<Self> {
        let auth_url = normalize_auth_url(url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "anon key must not be empty",
            ));
        }

        let (sessions, _) = watch::channel(None);
        Ok(Self {
            auth_url,
            anon_key,
            client: Client::builder().build()?,
            store,
            sessions,
        })
    }

    /// Subscribe to session changes. The receiver observes the current
    /// identity immediately and every subsequent change, including the
    /// transition to `None` on sign-out.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.sessions.subscribe()
    }

    /// The currently authenticated session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<AuthSession> {
        self.sessions.borrow().clone()
    }

    /// Load a persisted session at startup and publish it if still valid.
    pub fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored) = self.store.load_session()? else {
            return Ok(None);
        };

        if stored.is_expired() {
            tracing::debug!("Discarding expired persisted session");
            self.store.clear_session()?;
            return Ok(None);
        }

        self.publish(Some(stored.clone()));
        Ok(Some(stored))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<()> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "password")])
                .json(&payload),
        );

        let response = self.send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Unknown("Sign-in response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        self.publish(Some(session));
        Ok(())
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.public_request(
            self.client
                .post(format!("{}/signup", self.auth_url))
                .json(&payload),
        );

        let response = self.send_auth_request(request).await?;
        match response.into_session()? {
            Some(session) => {
                self.store.save_session(&session)?;
                self.publish(Some(session));
                Ok(SignUpOutcome::SignedIn)
            }
            None => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    /// Sign out the current user.
    ///
    /// The local session is always cleared and `None` is published, even when
    /// the token revocation request fails; observers must tear down all note
    /// and draft state on that transition.
    pub async fn sign_out(&self) -> AuthResult<()> {
        if let Some(session) = self.current_session() {
            let request = self
                .client
                .post(format!("{}/logout", self.auth_url))
                .header("apikey", &self.anon_key)
                .bearer_auth(&session.access_token);

            match request.send().await {
                Ok(response)
                    if response.status().is_success()
                        || response.status() == StatusCode::UNAUTHORIZED => {}
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    tracing::warn!("Sign-out revocation failed: {}", api_message(status, &body));
                }
                Err(error) => {
                    tracing::warn!("Sign-out revocation failed: {error}");
                }
            }
        }

        self.store.clear_session()?;
        self.publish(None);
        Ok(())
    }

    fn publish(&self, session: Option<AuthSession>) {
        self.sessions.send_replace(session);
    }

    fn public_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn send_auth_request(&self, request: RequestBuilder) -> AuthResult<AuthResponse> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body));
        }
        Ok(response.json::<AuthResponse>().await?)
    }
}

/// Normalize a backend base URL into its auth endpoint.
pub fn normalize_auth_url(url: &str) -> AuthResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::InvalidConfiguration("URL must not be empty"));
    }
    if !is_http_url(trimmed) {
        return Err(AuthError::InvalidConfiguration(
            "URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/auth/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/auth/v1"))
    }
}

/// Resolve the optional backend endpoint pair, treating blank values as
/// absent. Having only one of the two is a configuration error.
pub fn resolve_optional_backend_config(
    url: Option<String>,
    anon_key: Option<String>,
) -> AuthResult<Option<(String, String)>> {
    let url = normalize_text_option(url);
    let anon_key = normalize_text_option(anon_key);

    match (url, anon_key) {
        (None, None) => Ok(None),
        (Some(url), Some(anon_key)) => Ok(Some((url, anon_key))),
        _ => Err(AuthError::InvalidConfiguration(
            "URL and anon key must be set together",
        )),
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Unknown("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::Unknown("Password is required".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<GoTrueUser>,
}

impl AuthResponse {
    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        let expires_at = self.expires_at.or_else(|| {
            self.expires_in
                .map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
        });

        match (self.access_token, self.refresh_token, expires_at, self.user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user: user.into(),
                }))
            }
            // Sign-up without auto-confirm returns the user but no tokens.
            (None, None, None, Some(_)) => Ok(None),
            _ => Err(AuthError::Unknown(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    email: Option<String>,
}

impl From<GoTrueUser> for AuthUser {
    fn from(value: GoTrueUser) -> Self {
        Self {
            id: UserId::from(value.id),
            email: value.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueErrorResponse {
    error_code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

/// Map an identity service error response onto the `AuthError` taxonomy.
fn classify_api_error(status: StatusCode, body: &str) -> AuthError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AuthError::RateLimited;
    }

    let parsed = serde_json::from_str::<GoTrueErrorResponse>(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|payload| payload.error_code.clone())
        .unwrap_or_default();
    let message = parsed
        .and_then(|payload| {
            payload
                .message
                .or(payload.msg)
                .or(payload.error_description)
                .or(payload.error)
        })
        .unwrap_or_default();
    let lowered = format!("{code} {message}").to_lowercase();

    if lowered.contains("invalid_credentials")
        || lowered.contains("invalid_grant")
        || lowered.contains("invalid login credentials")
    {
        return AuthError::InvalidCredentials;
    }
    if lowered.contains("already registered")
        || lowered.contains("email_exists")
        || lowered.contains("user_already_exists")
    {
        return AuthError::EmailInUse;
    }

    AuthError::Unknown(api_message(status, &message))
}

fn api_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
