use serde::{Deserialize, Serialize};
use url::Url;

use crate::serde::{deserialize_optional_string, deserialize_string_or_number};

/// How a provider hands the identity back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFlow {
    /// Provider prompt returns a self-contained signed token.
    OidcImplicit,
    /// Provider redirects back with a short-lived code that must be exchanged.
    OAuthCode,
}

/// Supported identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    GitHub,
}

impl ProviderKind {
    /// Every provider, in the order the login panel lists them.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Google, ProviderKind::GitHub];

    /// The sign-in flow this provider uses.
    pub fn flow(self) -> AuthFlow {
        match self {
            Self::Google => AuthFlow::OidcImplicit,
            Self::GitHub => AuthFlow::OAuthCode,
        }
    }

    /// Tag used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }

    /// Human-readable label shown on the profile panel.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
        }
    }

    /// Parses a storage tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == tag)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized, provider-agnostic record of who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    /// Avatar URL. Stored as `picture` to match the provider claim name.
    #[serde(
        rename = "picture",
        default,
        deserialize_with = "deserialize_optional_string"
    )]
    pub picture_url: Option<String>,
    pub provider: ProviderKind,
}

/// Transient CSRF state for an authorization-code sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOAuthRequest {
    pub csrf_state: String,
}

impl PendingOAuthRequest {
    /// Start a new request with a fresh random state.
    pub fn generate() -> Self {
        Self {
            csrf_state: super::generate_state(),
        }
    }
}

/// Raw data a provider hands back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPayload {
    /// Signed token delivered by the implicit-flow prompt.
    Credential(String),
    /// Code and state delivered on the redirect back from the code flow.
    AuthorizationCode { code: String, state: String },
}

/// What happened when a sign-in was initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initiation {
    /// Provider prompt is on screen; the credential arrives via callback.
    Prompted,
    /// Provider reported the prompt was not displayed or was skipped.
    PromptDismissed,
    /// Browser was sent to the provider's authorization endpoint.
    Redirected(Url),
}

/// Outcome the provider prompt reports about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Displayed,
    NotDisplayed,
    Skipped,
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    AwaitingProvider { provider: ProviderKind, attempt: u64 },
    Authenticated(Identity),
}

impl SessionPhase {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Classification of a failed sign-in, carried on `AuthFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ProviderUnavailable,
    MalformedCredential,
    CsrfStateMismatch,
    ExchangeFailed,
    /// The provider redirected back with an `error` parameter.
    ProviderError,
    Internal,
}

/// Reason attached to an `AuthFailed` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl AuthFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The three outcomes the UI layer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    AuthSucceeded(Identity),
    AuthFailed(AuthFailure),
    SignedOut,
}

/// Everything broadcast to UI subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Lifecycle(LifecycleEvent),
    ShowLoading,
    HideLoading,
}

impl From<LifecycleEvent> for UiEvent {
    fn from(event: LifecycleEvent) -> Self {
        Self::Lifecycle(event)
    }
}
