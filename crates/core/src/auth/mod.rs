mod callback;
mod error;
mod functions;
mod serialization;
mod traits;
mod types;

pub use callback::{authorization_url, provider_error_message, scrub_query, CallbackParams};
pub use error::AuthError;
pub use functions::{
    callback_failure_message, claims_to_identity, decode_id_token_claims, email_to_name,
    generate_state, initiation_failure_message, verify_state, IdTokenClaims,
};
pub use serialization::{deserialize_identity, serialize_identity, IDENTITY_SCHEMA_VERSION};
pub use traits::{CodeExchanger, IdentityServices, Navigator, ProviderAdapter, Result, SessionStorage};
pub use types::{
    AuthFailure, AuthFlow, CallbackPayload, FailureKind, Identity, Initiation, LifecycleEvent,
    PendingOAuthRequest, PromptOutcome, ProviderKind, SessionPhase, UiEvent,
};
