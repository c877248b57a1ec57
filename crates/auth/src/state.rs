//! Application state for auth.

use std::sync::Arc;

use signin_core::auth::{CodeExchanger, IdentityServices, Navigator, SessionStorage};

use crate::config::AuthConfig;
use crate::controller::AuthSessionController;
use crate::events::EventBus;
use crate::providers::{
    BackendExchanger, DemoExchanger, GitHubProvider, GoogleProvider, ProviderRegistry,
};
use crate::router::{CallbackRouter, RouteOutcome};
use crate::sessions::SessionStore;

/// Shared auth components, built once per application instance.
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub store: SessionStore,
    pub bus: EventBus,
    pub controller: Arc<AuthSessionController>,
    pub router: Arc<CallbackRouter>,
}

impl AuthState {
    /// Wires the store, providers, controller and router together.
    ///
    /// The code flow uses the backend exchanger when `OAUTH_EXCHANGE_URL` is
    /// configured and the demo exchanger otherwise.
    pub fn new(
        config: AuthConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
        services: Arc<dyn IdentityServices>,
    ) -> Self {
        let store = SessionStore::new(storage);
        let bus = EventBus::new();

        let exchanger: Arc<dyn CodeExchanger> = match &config.github.exchange_url {
            Some(url) => {
                tracing::info!(%url, "Using backend code exchange");
                Arc::new(BackendExchanger::new(url.clone()))
            }
            None => {
                tracing::info!("No exchange backend configured, using demo exchange");
                Arc::new(DemoExchanger::new(config.github.exchange_delay))
            }
        };

        let providers = ProviderRegistry::new()
            .with(Arc::new(GoogleProvider::new(services)))
            .with(Arc::new(GitHubProvider::new(
                config.github.clone(),
                store.clone(),
                navigator.clone(),
                exchanger,
            )));

        let controller = Arc::new(AuthSessionController::new(
            store.clone(),
            providers,
            bus.clone(),
        ));
        let router = Arc::new(CallbackRouter::new(controller.clone(), navigator));

        Self {
            config,
            store,
            bus,
            controller,
            router,
        }
    }

    /// Page-load sequence: restore the stored session, then handle any
    /// callback parameters in the address.
    pub async fn boot(&self) -> RouteOutcome {
        self.controller.restore().await;
        self.router.on_navigation().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use signin_core::auth::{
        LifecycleEvent, PromptOutcome, ProviderKind, SessionPhase, UiEvent,
    };
    use url::Url;

    use crate::controller::CallbackOutcome;
    use crate::events::drain;
    use crate::navigator::MemoryNavigator;
    use crate::providers::ScriptedIdentityServices;
    use crate::sessions::MemoryStorage;
    use crate::testing::identity;

    fn config() -> AuthConfig {
        let vars = HashMap::from([("OAUTH_EXCHANGE_DELAY_MS", "0")]);
        AuthConfig::from_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap()
    }

    /// A page load over an existing storage area and address bar.
    fn page(storage: &MemoryStorage, navigator: &MemoryNavigator) -> AuthState {
        AuthState::new(
            config(),
            Arc::new(storage.clone()),
            Arc::new(navigator.clone()),
            Arc::new(ScriptedIdentityServices::new(PromptOutcome::Displayed)),
        )
    }

    fn at(address: &str) -> MemoryNavigator {
        MemoryNavigator::new(Url::parse(address).unwrap())
    }

    #[tokio::test]
    async fn test_boot_empty() {
        let state = page(&MemoryStorage::new(), &at("http://localhost:3000/"));
        let mut rx = state.bus.subscribe();

        assert_eq!(state.boot().await, RouteOutcome::NoCallback);
        assert_eq!(state.controller.phase().await, SessionPhase::Anonymous);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_boot_restores_stored_identity() {
        let state = page(&MemoryStorage::new(), &at("http://localhost:3000/"));
        let ann = identity("Ann Lee", ProviderKind::Google);
        state.store.save(&ann).unwrap();
        let mut rx = state.bus.subscribe();

        state.boot().await;

        assert_eq!(state.controller.current_identity().await, Some(ann.clone()));
        assert_eq!(
            drain(&mut rx),
            vec![UiEvent::Lifecycle(LifecycleEvent::AuthSucceeded(ann))]
        );
    }

    #[tokio::test]
    async fn test_github_round_trip_through_redirect() {
        let storage = MemoryStorage::new();
        let navigator = at("http://localhost:3000/");

        let before = page(&storage, &navigator);
        before.controller.initiate_sign_in(ProviderKind::GitHub).await;

        let authorize = navigator.last_assigned().unwrap();
        assert!(authorize
            .as_str()
            .starts_with("https://github.com/login/oauth/authorize?"));
        let csrf = authorize
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        // The provider sends the browser back, which reloads the page
        navigator.visit(
            Url::parse(&format!("http://localhost:3000/?code=abc&state={csrf}")).unwrap(),
        );
        let after = page(&storage, &navigator);

        assert_eq!(
            after.boot().await,
            RouteOutcome::Callback(CallbackOutcome::Authenticated(
                DemoExchanger::placeholder_identity()
            ))
        );
        assert_eq!(navigator.current().as_str(), "http://localhost:3000/");
        assert_eq!(after.store.load(), Some(DemoExchanger::placeholder_identity()));
    }

    #[tokio::test]
    async fn test_forged_callback_keeps_restored_session() {
        let storage = MemoryStorage::new();
        let ann = identity("Ann Lee", ProviderKind::Google);
        SessionStore::new(Arc::new(storage.clone())).save(&ann).unwrap();
        let navigator = at("http://localhost:3000/?code=evil&state=forged");

        let state = page(&storage, &navigator);
        let outcome = state.boot().await;

        assert!(matches!(
            outcome,
            RouteOutcome::Callback(CallbackOutcome::Failed(_))
        ));
        assert_eq!(state.controller.current_identity().await, Some(ann.clone()));
        assert_eq!(state.store.load(), Some(ann));
        assert_eq!(navigator.current().as_str(), "http://localhost:3000/");
    }

    #[tokio::test]
    async fn test_error_redirect_discards_pending_state() {
        let storage = MemoryStorage::new();
        let navigator = at("http://localhost:3000/");

        let before = page(&storage, &navigator);
        before.controller.initiate_sign_in(ProviderKind::GitHub).await;
        let csrf = navigator
            .last_assigned()
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        navigator.visit(
            Url::parse(&format!(
                "http://localhost:3000/?error=access_denied&state={csrf}"
            ))
            .unwrap(),
        );
        let after = page(&storage, &navigator);

        assert!(matches!(after.boot().await, RouteOutcome::ProviderError(_)));
        assert_eq!(after.store.take_pending_state(), None);
    }

    #[test]
    fn test_backend_exchanger_selected_when_configured() {
        let vars = HashMap::from([("OAUTH_EXCHANGE_URL", "http://localhost:3001/exchange")]);
        let config = AuthConfig::from_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        let state = AuthState::new(
            config,
            Arc::new(MemoryStorage::new()),
            Arc::new(at("http://localhost:3000/")),
            Arc::new(ScriptedIdentityServices::new(PromptOutcome::Displayed)),
        );
        assert_eq!(
            state.config.github.exchange_url.as_ref().map(Url::as_str),
            Some("http://localhost:3001/exchange")
        );
        assert!(state.controller.providers().get(ProviderKind::GitHub).is_ok());
    }
}
