//! Google implicit-flow provider implementation.
//!
//! Sign-in goes through the Identity Services prompt. The SDK hands back a
//! signed ID token whose payload carries the profile claims.

use std::sync::Arc;

use async_trait::async_trait;
use signin_core::auth::{
    claims_to_identity, decode_id_token_claims, AuthError, CallbackPayload, Identity,
    IdentityServices, Initiation, PromptOutcome, ProviderAdapter, ProviderKind, Result,
};
use tracing::{debug, info};

/// Google provider backed by the Identity Services runtime.
pub struct GoogleProvider {
    services: Arc<dyn IdentityServices>,
}

impl GoogleProvider {
    pub fn new(services: Arc<dyn IdentityServices>) -> Self {
        Self { services }
    }

    fn require_runtime(&self) -> Result<()> {
        if self.services.is_loaded() {
            Ok(())
        } else {
            Err(AuthError::ProviderUnavailable(ProviderKind::Google))
        }
    }
}

#[async_trait]
impl ProviderAdapter for GoogleProvider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Google
    }

    async fn initiate(&self) -> Result<Initiation> {
        self.require_runtime()?;

        match self.services.prompt() {
            PromptOutcome::Displayed => Ok(Initiation::Prompted),
            outcome => {
                info!(?outcome, "Google prompt was not shown");
                Ok(Initiation::PromptDismissed)
            }
        }
    }

    async fn normalize(&self, payload: CallbackPayload) -> Result<Identity> {
        self.require_runtime()?;

        let token = match payload {
            CallbackPayload::Credential(token) => token,
            CallbackPayload::AuthorizationCode { .. } => {
                return Err(AuthError::MalformedCredential(
                    "Google callbacks carry a credential, not a code".to_string(),
                ))
            }
        };

        let claims = decode_id_token_claims(&token)?;
        debug!("Decoded Google ID token claims");
        Ok(claims_to_identity(claims, ProviderKind::Google))
    }

    fn sign_out(&self) {
        if self.services.is_loaded() {
            self.services.disable_auto_select();
        }
    }
}
