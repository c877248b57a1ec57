//! Session state machine.
//!
//! The controller owns the current [`SessionPhase`], drives the provider
//! adapters and keeps the [`SessionStore`] in step with the phase. Every
//! transition is announced on the [`EventBus`].
//!
//! Provider work is asynchronous. Each sign-in attempt gets an id from a
//! monotonically increasing counter; a result that resolves after its attempt
//! was superseded (a newer initiation, a newer callback or a sign-out) is
//! dropped without touching state, storage or the bus.

use signin_core::auth::{
    callback_failure_message, initiation_failure_message, AuthError, AuthFailure,
    CallbackPayload, Identity, Initiation, ProviderKind, SessionPhase,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::events::EventBus;
use crate::providers::ProviderRegistry;
use crate::sessions::SessionStore;

/// How a provider callback ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Authenticated(Identity),
    Failed(AuthFailure),
    /// A newer attempt started while this one was in flight.
    Superseded,
}

#[derive(Debug)]
struct Inner {
    phase: SessionPhase,
    next_attempt: u64,
}

impl Inner {
    fn begin(&mut self, provider: ProviderKind) -> u64 {
        self.next_attempt += 1;
        let attempt = self.next_attempt;
        self.phase = SessionPhase::AwaitingProvider { provider, attempt };
        attempt
    }

    fn is_current(&self, attempt: u64) -> bool {
        matches!(
            self.phase,
            SessionPhase::AwaitingProvider { attempt: current, .. } if current == attempt
        )
    }
}

pub struct AuthSessionController {
    inner: RwLock<Inner>,
    store: SessionStore,
    providers: ProviderRegistry,
    bus: EventBus,
}

impl AuthSessionController {
    pub fn new(store: SessionStore, providers: ProviderRegistry, bus: EventBus) -> Self {
        Self {
            inner: RwLock::new(Inner {
                phase: SessionPhase::Anonymous,
                next_attempt: 0,
            }),
            store,
            providers,
            bus,
        }
    }

    /// Restore a persisted session on boot.
    ///
    /// Emits `AuthSucceeded` when a stored identity is found.
    pub async fn restore(&self) -> Option<Identity> {
        let restored = self.store.load();
        let mut inner = self.inner.write().await;

        match restored {
            Some(identity) => {
                info!(provider = %identity.provider, "Restored session");
                inner.phase = SessionPhase::Authenticated(identity.clone());
                self.bus.auth_succeeded(identity.clone());
                Some(identity)
            }
            None => {
                debug!("No stored session");
                inner.phase = SessionPhase::Anonymous;
                None
            }
        }
    }

    /// Start a sign-in with the given provider.
    ///
    /// Failures are reported on the bus as `AuthFailed` and yield `None`.
    pub async fn initiate_sign_in(&self, provider: ProviderKind) -> Option<Initiation> {
        let attempt = self.inner.write().await.begin(provider);
        info!(%provider, attempt, "Starting sign-in");
        self.bus.show_loading();

        let result = match self.providers.get(provider) {
            Ok(adapter) => adapter.initiate().await,
            Err(e) => Err(e),
        };

        let mut inner = self.inner.write().await;
        if !inner.is_current(attempt) {
            warn!(%provider, attempt, "Sign-in initiation superseded");
            return None;
        }

        match result {
            Ok(Initiation::PromptDismissed) => {
                info!(%provider, "Sign-in prompt dismissed");
                inner.phase = SessionPhase::Anonymous;
                self.bus.hide_loading();
                Some(Initiation::PromptDismissed)
            }
            Ok(initiation) => Some(initiation),
            Err(e) => {
                warn!(%provider, "Failed to start sign-in: {}", e);
                inner.phase = SessionPhase::Anonymous;
                self.bus.auth_failed(AuthFailure::new(
                    e.failure_kind(),
                    initiation_failure_message(provider),
                ));
                None
            }
        }
    }

    /// Handle a provider callback.
    ///
    /// Accepted from any phase: a code-flow callback arrives after a full
    /// page load, when the controller has booted anonymous. A failed callback
    /// that arrives while authenticated, with no attempt awaiting it, reports
    /// `AuthFailed` and then re-announces the existing session, leaving
    /// storage untouched.
    pub async fn provider_callback(
        &self,
        provider: ProviderKind,
        payload: CallbackPayload,
    ) -> CallbackOutcome {
        let (attempt, resume) = {
            let mut inner = self.inner.write().await;
            let adopted = match &inner.phase {
                SessionPhase::AwaitingProvider {
                    provider: awaiting,
                    attempt,
                } if *awaiting == provider => Some(*attempt),
                _ => None,
            };
            match adopted {
                Some(attempt) => (attempt, None),
                None => {
                    let resume = inner.phase.identity().cloned();
                    (inner.begin(provider), resume)
                }
            }
        };
        debug!(%provider, attempt, "Handling provider callback");

        let result = match self.providers.get(provider) {
            Ok(adapter) => adapter.normalize(payload).await,
            Err(e) => Err(e),
        };

        let mut inner = self.inner.write().await;
        if !inner.is_current(attempt) {
            warn!(%provider, attempt, "Discarding stale provider callback");
            return CallbackOutcome::Superseded;
        }

        match result {
            Ok(identity) => {
                if let Err(e) = self.store.save(&identity) {
                    warn!("Signed in but failed to persist session: {}", e);
                }
                info!(%provider, "Signed in");
                inner.phase = SessionPhase::Authenticated(identity.clone());
                self.bus.auth_succeeded(identity.clone());
                CallbackOutcome::Authenticated(identity)
            }
            Err(e) => {
                let failure = callback_failure(provider, &e);
                warn!(%provider, kind = ?failure.kind, "Sign-in failed: {}", e);
                self.bus.auth_failed(failure.clone());

                // An unsolicited callback must not end the session it landed on
                match resume {
                    Some(identity) => {
                        info!(provider = %identity.provider, "Keeping existing session");
                        inner.phase = SessionPhase::Authenticated(identity.clone());
                        self.bus.auth_succeeded(identity);
                    }
                    None => {
                        inner.phase = SessionPhase::Anonymous;
                        self.store.clear();
                    }
                }
                CallbackOutcome::Failed(failure)
            }
        }
    }

    /// Drop the pending code-flow request after the provider answered with
    /// an error. An attempt still awaiting the provider ends with it.
    pub async fn abandon_pending(&self) {
        let mut inner = self.inner.write().await;
        self.store.clear_pending_state();

        if let SessionPhase::AwaitingProvider { provider, attempt } = inner.phase {
            debug!(%provider, attempt, "Abandoning sign-in attempt");
            inner.next_attempt += 1;
            inner.phase = SessionPhase::Anonymous;
        }
    }

    /// Sign out. Safe to call in any phase; always emits one `SignedOut`.
    pub async fn sign_out(&self) {
        let mut inner = self.inner.write().await;

        if let SessionPhase::Authenticated(identity) = &inner.phase {
            if let Ok(adapter) = self.providers.get(identity.provider) {
                adapter.sign_out();
            }
        }

        // Bumping the counter strands any attempt still in flight
        inner.next_attempt += 1;
        inner.phase = SessionPhase::Anonymous;
        self.store.clear();
        self.store.clear_pending_state();

        info!("Signed out");
        self.bus.signed_out();
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.read().await.phase.clone()
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        self.inner.read().await.phase.identity().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(
            self.inner.read().await.phase,
            SessionPhase::Authenticated(_)
        )
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }
}

fn callback_failure(provider: ProviderKind, error: &AuthError) -> AuthFailure {
    AuthFailure::new(error.failure_kind(), callback_failure_message(provider))
}
