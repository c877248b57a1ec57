use async_trait::async_trait;
use url::Url;

use super::{AuthError, CallbackPayload, Identity, Initiation, PromptOutcome, ProviderKind};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Abstraction over identity providers.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which provider this adapter represents.
    fn provider(&self) -> ProviderKind;

    /// Begin sign-in: show the provider prompt or redirect the browser.
    async fn initiate(&self) -> Result<Initiation>;

    /// Turn a provider callback payload into a normalized identity.
    async fn normalize(&self, payload: CallbackPayload) -> Result<Identity>;

    /// Provider-specific cleanup on sign-out.
    fn sign_out(&self) {}
}

/// Session-scoped key/value storage (the browser's `sessionStorage`).
///
/// Missing keys are a normal outcome, not an error.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Runtime object of the implicit-flow provider (its client-side SDK).
pub trait IdentityServices: Send + Sync {
    /// Whether the provider script is present at call time.
    fn is_loaded(&self) -> bool;

    /// Show the provider's sign-in prompt.
    fn prompt(&self) -> PromptOutcome;

    /// Stop the provider from silently re-selecting the last account.
    fn disable_auto_select(&self);
}

/// Exchanges an authorization code for an identity.
#[async_trait]
pub trait CodeExchanger: Send + Sync {
    async fn exchange(&self, code: &str, state: &str) -> Result<Identity>;
}

/// The browser's location and history.
pub trait Navigator: Send + Sync {
    /// Current address.
    fn current(&self) -> Url;

    /// Replace the current history entry without reloading.
    fn replace(&self, url: Url);

    /// Navigate away (full page load).
    fn assign(&self, url: Url);
}
