//! Identity provider adapters.
//!
//! This module contains implementations of `ProviderAdapter` for:
//! - Google (implicit flow through the Identity Services prompt)
//! - GitHub (authorization-code flow with CSRF state)

mod exchange;
mod github;
mod google;
mod services;

use std::collections::HashMap;
use std::sync::Arc;

use signin_core::auth::{AuthError, AuthFlow, ProviderAdapter, ProviderKind, Result};

pub use exchange::{BackendExchanger, DemoExchanger};
pub use github::GitHubProvider;
pub use google::GoogleProvider;
pub use services::{ScriptedIdentityServices, UnloadedIdentityServices};

/// The adapters available to the controller, keyed by provider.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderKind, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter, replacing any earlier one for the same provider.
    pub fn with(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.adapters.insert(adapter.provider(), adapter);
        self
    }

    /// Gets the adapter for the given provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotConfigured` if no adapter was registered.
    pub fn get(&self, provider: ProviderKind) -> Result<Arc<dyn ProviderAdapter>> {
        self.adapters
            .get(&provider)
            .cloned()
            .ok_or(AuthError::ProviderNotConfigured(provider))
    }

    /// The provider whose callbacks arrive as `code`/`state` navigation parameters.
    pub fn code_flow_provider(&self) -> Option<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|p| p.flow() == AuthFlow::OAuthCode)
            .find(|p| self.adapters.contains_key(p))
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        ProviderKind::ALL
            .into_iter()
            .filter(|p| self.adapters.contains_key(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_provider_is_not_configured() {
        let registry = ProviderRegistry::new();
        assert!(matches!(
            registry.get(ProviderKind::Google),
            Err(AuthError::ProviderNotConfigured(ProviderKind::Google))
        ));
        assert_eq!(registry.code_flow_provider(), None);
    }

    #[test]
    fn test_registered_providers() {
        let registry = ProviderRegistry::new().with(Arc::new(GoogleProvider::new(Arc::new(
            UnloadedIdentityServices,
        ))));

        assert!(registry.get(ProviderKind::Google).is_ok());
        assert_eq!(
            registry.providers().collect::<Vec<_>>(),
            vec![ProviderKind::Google]
        );
        // Google is implicit-flow, so there is still no code-flow provider
        assert_eq!(registry.code_flow_provider(), None);
    }
}
