//! Inspects the page address for provider callbacks.

use std::sync::Arc;

use signin_core::auth::{
    provider_error_message, scrub_query, AuthFailure, CallbackParams, CallbackPayload,
    FailureKind, Navigator, ProviderKind,
};
use tracing::{debug, info};

use crate::controller::{AuthSessionController, CallbackOutcome};

/// What the router found in the current address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    NoCallback,
    /// The provider redirected back with an `error` parameter.
    ProviderError(AuthFailure),
    Callback(CallbackOutcome),
}

/// Routes redirect-back navigations to the controller.
///
/// Call [`on_navigation`](Self::on_navigation) on boot and after every
/// back/forward navigation. Consumed callback parameters are scrubbed from the
/// address so a reload cannot replay them.
pub struct CallbackRouter {
    controller: Arc<AuthSessionController>,
    navigator: Arc<dyn Navigator>,
}

impl CallbackRouter {
    pub fn new(controller: Arc<AuthSessionController>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            controller,
            navigator,
        }
    }

    pub async fn on_navigation(&self) -> RouteOutcome {
        let current = self.navigator.current();

        match CallbackParams::from_url(&current) {
            CallbackParams::None => RouteOutcome::NoCallback,
            CallbackParams::Error { error, description } => {
                info!(error = %error, "Provider redirected back with an error");
                let failure = AuthFailure::new(
                    FailureKind::ProviderError,
                    provider_error_message(&error, description.as_deref()),
                );
                self.controller.abandon_pending().await;
                self.controller.bus().auth_failed(failure.clone());
                self.scrub();
                RouteOutcome::ProviderError(failure)
            }
            CallbackParams::Code { code, state } => {
                let provider = self
                    .controller
                    .providers()
                    .code_flow_provider()
                    .unwrap_or(ProviderKind::GitHub);
                debug!(%provider, "Authorization-code callback detected");

                self.controller.bus().show_loading();
                let outcome = self
                    .controller
                    .provider_callback(provider, CallbackPayload::AuthorizationCode { code, state })
                    .await;
                self.scrub();
                RouteOutcome::Callback(outcome)
            }
        }
    }

    fn scrub(&self) {
        if let Some(clean) = scrub_query(&self.navigator.current()) {
            self.navigator.replace(clean);
        }
    }
}
