//! One page load: auth state, UI and the event subscription between them.

use std::sync::Arc;

use signin_auth::{AuthConfig, AuthState, MemoryNavigator, RouteOutcome};
use signin_core::auth::{IdentityServices, SessionStorage, UiEvent};
use tokio::sync::broadcast;
use url::Url;

use crate::ui::UiChoreographer;

pub struct Page {
    pub auth: AuthState,
    pub ui: UiChoreographer,
    pub navigator: MemoryNavigator,
    events: broadcast::Receiver<UiEvent>,
}

impl Page {
    /// Build the page at `address`. The UI subscribes before anything runs,
    /// so no event from boot is missed.
    pub fn open(
        config: AuthConfig,
        storage: Arc<dyn SessionStorage>,
        address: Url,
        services: Arc<dyn IdentityServices>,
    ) -> Self {
        let navigator = MemoryNavigator::new(address);
        let ui = UiChoreographer::new(config.notification_ttl);
        let auth = AuthState::new(config, storage, Arc::new(navigator.clone()), services);
        let events = auth.bus.subscribe();

        Self {
            auth,
            ui,
            navigator,
            events,
        }
    }

    /// Restore the session and handle callback parameters in the address.
    pub async fn boot(&mut self) -> RouteOutcome {
        let outcome = self.auth.boot().await;
        self.settle();
        outcome
    }

    /// Apply queued events to the UI.
    pub fn settle(&mut self) -> usize {
        self.ui.drain(&mut self.events)
    }
}
