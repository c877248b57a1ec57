//! Durable mirror of the signed-in identity and the pending OAuth state.

use std::sync::Arc;

use signin_core::auth::{
    deserialize_identity, serialize_identity, AuthError, Identity, ProviderKind, Result,
    SessionStorage,
};
use tracing::{debug, error, warn};

/// Key holding the JSON-encoded identity.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key holding the provider tag of the signed-in identity.
pub const AUTH_PROVIDER_KEY: &str = "authProvider";

/// Key holding the CSRF state of an in-flight authorization-code sign-in.
pub const PENDING_STATE_KEY: &str = "oauth_pending_state";

/// Session store over a session-scoped key/value backend.
///
/// Every operation is synchronous. Missing keys are reported as absence.
/// Backend failures on reads are treated as absence and failures on removals
/// are logged, so callers only ever see an error from `save`.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Persist the signed-in identity.
    pub fn save(&self, identity: &Identity) -> Result<()> {
        let payload = serialize_identity(identity)?;
        self.storage.set(CURRENT_USER_KEY, &payload)?;
        self.storage
            .set(AUTH_PROVIDER_KEY, identity.provider.as_str())?;
        debug!(provider = %identity.provider, "Session saved");
        Ok(())
    }

    /// Load the persisted identity.
    ///
    /// Corrupt data is cleared and reported as absence. Pending state is left
    /// alone so an in-flight code callback can still be verified.
    pub fn load(&self) -> Option<Identity> {
        let raw_user = self.read(CURRENT_USER_KEY)?;
        let raw_provider = self.read(AUTH_PROVIDER_KEY)?;

        match parse_session(&raw_user, &raw_provider) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("Discarding stored session: {}", e);
                self.clear();
                None
            }
        }
    }

    /// Remove the persisted identity.
    pub fn clear(&self) {
        self.remove(CURRENT_USER_KEY);
        self.remove(AUTH_PROVIDER_KEY);
    }

    /// Remember the CSRF state of a new authorization-code sign-in.
    ///
    /// Overwrites any earlier pending state.
    pub fn save_pending_state(&self, csrf_state: &str) -> Result<()> {
        self.storage.set(PENDING_STATE_KEY, csrf_state)
    }

    /// Read and delete the pending CSRF state.
    pub fn take_pending_state(&self) -> Option<String> {
        let state = self.read(PENDING_STATE_KEY);
        self.remove(PENDING_STATE_KEY);
        state
    }

    pub fn clear_pending_state(&self) {
        self.remove(PENDING_STATE_KEY);
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                error!(key, "Failed to read session storage: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            error!(key, "Failed to remove session storage key: {}", e);
        }
    }
}

fn parse_session(raw_user: &str, raw_provider: &str) -> Result<Identity> {
    let identity = deserialize_identity(raw_user)?;
    let provider = ProviderKind::from_tag(raw_provider).ok_or_else(|| {
        AuthError::CorruptSession(format!("unknown provider tag {raw_provider:?}"))
    })?;

    if provider != identity.provider {
        return Err(AuthError::CorruptSession(format!(
            "provider tag {} does not match identity provider {}",
            provider, identity.provider
        )));
    }

    Ok(identity)
}
