//! Client-side OAuth session handling for signin.
//!
//! This crate provides:
//! - Provider adapters for Google (implicit flow) and GitHub (authorization code)
//! - The session state machine and the callback router that feeds it
//! - Session storage backends (in-memory or a JSON file)
//! - A Mock IdP for local development (feature `mock`)

mod config;
mod controller;
mod error;
mod events;
mod navigator;
mod providers;
mod router;
mod sessions;
mod state;

#[cfg(test)]
mod testing;

pub use config::{AuthConfig, CodeFlowConfig, ProviderConfig};
pub use controller::{AuthSessionController, CallbackOutcome};
pub use error::AuthError;
pub use events::{drain, EventBus};
pub use navigator::MemoryNavigator;
pub use providers::{
    BackendExchanger, DemoExchanger, GitHubProvider, GoogleProvider, ProviderRegistry,
    ScriptedIdentityServices, UnloadedIdentityServices,
};
pub use router::{CallbackRouter, RouteOutcome};
pub use sessions::{
    FileStorage, MemoryStorage, SessionStore, AUTH_PROVIDER_KEY, CURRENT_USER_KEY,
    PENDING_STATE_KEY,
};
pub use state::AuthState;

#[cfg(feature = "mock")]
pub mod mock_idp;
