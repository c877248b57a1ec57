//! GitHub authorization-code provider implementation.
//!
//! Initiation stores a fresh CSRF state and sends the browser to the
//! authorization endpoint. The code that comes back on the redirect is only
//! exchanged after the returned state matches the stored one.

use std::sync::Arc;

use async_trait::async_trait;
use signin_core::auth::{
    authorization_url, verify_state, AuthError, CallbackPayload, CodeExchanger, Identity,
    Initiation, Navigator, PendingOAuthRequest, ProviderAdapter, ProviderKind, Result,
};
use tracing::{debug, info, warn};

use crate::config::CodeFlowConfig;
use crate::sessions::SessionStore;

pub struct GitHubProvider {
    config: CodeFlowConfig,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    exchanger: Arc<dyn CodeExchanger>,
}

impl GitHubProvider {
    pub fn new(
        config: CodeFlowConfig,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
        exchanger: Arc<dyn CodeExchanger>,
    ) -> Self {
        Self {
            config,
            store,
            navigator,
            exchanger,
        }
    }
}

#[async_trait]
impl ProviderAdapter for GitHubProvider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    async fn initiate(&self) -> Result<Initiation> {
        let request = PendingOAuthRequest::generate();
        self.store.save_pending_state(&request.csrf_state)?;

        let url = authorization_url(
            &self.config.authorize_url,
            &self.config.provider.client_id,
            &self.config.provider.redirect_uri,
            &self.config.provider.scope,
            &request.csrf_state,
        );

        info!(endpoint = %self.config.authorize_url, "Redirecting to GitHub authorization");
        self.navigator.assign(url.clone());
        Ok(Initiation::Redirected(url))
    }

    async fn normalize(&self, payload: CallbackPayload) -> Result<Identity> {
        let (code, state) = match payload {
            CallbackPayload::AuthorizationCode { code, state } => (code, state),
            CallbackPayload::Credential(_) => {
                return Err(AuthError::MalformedCredential(
                    "GitHub callbacks carry a code, not a credential".to_string(),
                ))
            }
        };

        // The stored state is single-use whether or not it matches
        let expected = self.store.take_pending_state();
        if let Err(e) = verify_state(expected.as_deref(), &state) {
            warn!(has_pending = expected.is_some(), "OAuth state did not match");
            return Err(e);
        }

        debug!("OAuth state verified, exchanging code");
        self.exchanger.exchange(&code, &state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use url::Url;

    use crate::config::ProviderConfig;
    use crate::navigator::MemoryNavigator;
    use crate::providers::DemoExchanger;
    use crate::sessions::MemoryStorage;

    struct Fixture {
        provider: GitHubProvider,
        store: SessionStore,
        navigator: MemoryNavigator,
    }

    fn fixture() -> Fixture {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let navigator = MemoryNavigator::new(Url::parse("http://localhost:3000/").unwrap());
        let config = CodeFlowConfig {
            provider: ProviderConfig {
                client_id: "gh-client".to_string(),
                redirect_uri: Url::parse("http://localhost:3000/").unwrap(),
                scope: "read:user user:email".to_string(),
            },
            authorize_url: Url::parse("https://github.com/login/oauth/authorize").unwrap(),
            exchange_url: None,
            exchange_delay: Duration::ZERO,
        };
        let provider = GitHubProvider::new(
            config,
            store.clone(),
            Arc::new(navigator.clone()),
            Arc::new(DemoExchanger::new(Duration::ZERO)),
        );
        Fixture {
            provider,
            store,
            navigator,
        }
    }

    fn code(code: &str, state: &str) -> CallbackPayload {
        CallbackPayload::AuthorizationCode {
            code: code.to_string(),
            state: state.to_string(),
        }
    }

    #[tokio::test]
    async fn test_initiate_redirects_with_stored_state() {
        let f = fixture();

        let Initiation::Redirected(url) = f.provider.initiate().await.unwrap() else {
            panic!("expected a redirect");
        };

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let state = pairs
            .iter()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.clone())
            .unwrap();

        assert!(url.as_str().starts_with("https://github.com/login/oauth/authorize?"));
        assert!(pairs.contains(&("client_id".to_string(), "gh-client".to_string())));
        assert!(pairs.contains(&("scope".to_string(), "read:user user:email".to_string())));
        assert_eq!(f.navigator.last_assigned(), Some(url));
        assert_eq!(f.store.take_pending_state(), Some(state));
    }

    #[tokio::test]
    async fn test_each_initiation_overwrites_pending_state() {
        let f = fixture();
        f.provider.initiate().await.unwrap();
        f.provider.initiate().await.unwrap();

        let latest = f.navigator.last_assigned().unwrap();
        let state = latest
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(f.store.take_pending_state(), Some(state));
    }

    #[tokio::test]
    async fn test_normalize_with_matching_state() {
        let f = fixture();
        f.store.save_pending_state("S1").unwrap();

        let identity = f.provider.normalize(code("abc", "S1")).await.unwrap();

        assert_eq!(identity, DemoExchanger::placeholder_identity());
        assert_eq!(f.store.take_pending_state(), None);
    }

    #[tokio::test]
    async fn test_normalize_state_mismatch_consumes_pending_state() {
        let f = fixture();
        f.store.save_pending_state("S1").unwrap();

        let result = f.provider.normalize(code("abc", "S2")).await;

        assert!(matches!(result, Err(AuthError::CsrfStateMismatch)));
        assert_eq!(f.store.take_pending_state(), None);
    }

    #[tokio::test]
    async fn test_normalize_without_pending_state() {
        let f = fixture();
        let result = f.provider.normalize(code("abc", "S1")).await;
        assert!(matches!(result, Err(AuthError::CsrfStateMismatch)));
    }

    #[tokio::test]
    async fn test_normalize_rejects_credential_payload() {
        let f = fixture();
        let result = f
            .provider
            .normalize(CallbackPayload::Credential("a.b.c".to_string()))
            .await;
        assert!(matches!(result, Err(AuthError::MalformedCredential(_))));
    }
}
