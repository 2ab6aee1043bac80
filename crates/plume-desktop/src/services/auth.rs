//! Auth gate construction with secure session storage.

use keyring::Entry;

use plume_core::auth::{
    resolve_optional_backend_config, AuthError, AuthGate, AuthResult, SessionPersistence,
};
use plume_core::models::AuthSession;

const KEYRING_SERVICE_NAME: &str = "plume";
const KEYRING_SESSION_USERNAME: &str = "supabase_session";

/// Session persistence backed by the OS keyring.
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    service_name: String,
    username: String,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self {
            service_name: KEYRING_SERVICE_NAME.to_string(),
            username: KEYRING_SESSION_USERNAME.to_string(),
        }
    }
}

impl KeyringSessionStore {
    fn entry(&self) -> AuthResult<Entry> {
        Entry::new(&self.service_name, &self.username)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }
}

impl SessionPersistence for KeyringSessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let serialized = serde_json::to_string(session)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        self.entry()?
            .set_password(&serialized)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }

    fn clear_session(&self) -> AuthResult<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }
}

pub type AuthService = AuthGate<KeyringSessionStore>;

/// Build the auth gate from `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
///
/// Returns `None` when neither is set, so the app can render a configuration
/// hint instead of a login form.
pub fn auth_gate_from_env() -> AuthResult<Option<AuthService>> {
    let Some((url, anon_key)) = resolve_optional_backend_config(
        std::env::var("SUPABASE_URL").ok(),
        std::env::var("SUPABASE_ANON_KEY").ok(),
    )?
    else {
        return Ok(None);
    };

    Ok(Some(AuthGate::new(
        url,
        anon_key,
        KeyringSessionStore::default(),
    )?))
}
