use std::time::Duration;

use url::Url;

use crate::error::AuthError;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_GOOGLE_CLIENT_ID: &str = "YOUR_GOOGLE_CLIENT_ID.apps.googleusercontent.com";
const DEFAULT_GOOGLE_SCOPE: &str = "openid email profile";
const DEFAULT_GITHUB_CLIENT_ID: &str = "YOUR_GITHUB_CLIENT_ID";
const DEFAULT_GITHUB_SCOPE: &str = "read:user user:email";
const DEFAULT_GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const DEFAULT_EXCHANGE_DELAY_MS: u64 = 1_000;
const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

/// Configuration for a single identity provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub redirect_uri: Url,
    pub scope: String,
}

/// Authorization-code provider configuration.
#[derive(Debug, Clone)]
pub struct CodeFlowConfig {
    pub provider: ProviderConfig,
    pub authorize_url: Url,
    /// Backend that exchanges codes. `None` selects the demo exchanger.
    pub exchange_url: Option<Url>,
    /// Delay of the demo exchanger.
    pub exchange_delay: Duration,
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: Url,
    pub google: ProviderConfig,
    pub github: CodeFlowConfig,
    /// How long transient notifications stay on screen.
    pub notification_ttl: Duration,
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_BASE_URL`: Page origin, used as redirect URI (default: `http://localhost:3000`)
    /// - `GOOGLE_CLIENT_ID`: Google client ID (default: placeholder)
    /// - `GOOGLE_SCOPE`: Google scopes (default: `openid email profile`)
    /// - `GITHUB_CLIENT_ID`: GitHub OAuth app client ID (default: placeholder)
    /// - `GITHUB_SCOPE`: GitHub scopes (default: `read:user user:email`)
    /// - `GITHUB_AUTHORIZE_URL`: Authorization endpoint (default: GitHub's)
    /// - `OAUTH_EXCHANGE_URL`: Code-exchange backend (optional, demo exchange when unset)
    /// - `OAUTH_EXCHANGE_DELAY_MS`: Demo exchange delay (default: 1000)
    /// - `NOTIFICATION_TTL_SECS`: Notification lifetime (default: 5)
    ///
    /// # Errors
    ///
    /// Returns an error if one of the URL variables is not a valid URL.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AuthError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());
        let number_or = |key: &str, default: u64| {
            var(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let base_url = parse_url("AUTH_BASE_URL", &var_or("AUTH_BASE_URL", DEFAULT_BASE_URL))?;

        let google = ProviderConfig {
            client_id: var_or("GOOGLE_CLIENT_ID", DEFAULT_GOOGLE_CLIENT_ID),
            redirect_uri: base_url.clone(),
            scope: var_or("GOOGLE_SCOPE", DEFAULT_GOOGLE_SCOPE),
        };

        let exchange_url = var("OAUTH_EXCHANGE_URL")
            .map(|v| parse_url("OAUTH_EXCHANGE_URL", &v))
            .transpose()?;

        let github = CodeFlowConfig {
            provider: ProviderConfig {
                client_id: var_or("GITHUB_CLIENT_ID", DEFAULT_GITHUB_CLIENT_ID),
                redirect_uri: base_url.clone(),
                scope: var_or("GITHUB_SCOPE", DEFAULT_GITHUB_SCOPE),
            },
            authorize_url: parse_url(
                "GITHUB_AUTHORIZE_URL",
                &var_or("GITHUB_AUTHORIZE_URL", DEFAULT_GITHUB_AUTHORIZE_URL),
            )?,
            exchange_url,
            exchange_delay: Duration::from_millis(number_or(
                "OAUTH_EXCHANGE_DELAY_MS",
                DEFAULT_EXCHANGE_DELAY_MS,
            )),
        };

        let notification_ttl = Duration::from_secs(number_or(
            "NOTIFICATION_TTL_SECS",
            DEFAULT_NOTIFICATION_TTL_SECS,
        ));

        Ok(Self {
            base_url,
            google,
            github,
            notification_ttl,
        })
    }

    /// Whether a provider still carries its placeholder client ID.
    pub fn uses_placeholder_client_ids(&self) -> bool {
        self.google.client_id == DEFAULT_GOOGLE_CLIENT_ID
            || self.github.provider.client_id == DEFAULT_GITHUB_CLIENT_ID
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, AuthError> {
    Url::parse(value).map_err(|e| AuthError::Config(format!("{key} must be a valid URL: {e}")))
}
