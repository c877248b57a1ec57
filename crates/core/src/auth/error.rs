use thiserror::Error;

use super::{FailureKind, ProviderKind};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} sign-in is not available")]
    ProviderUnavailable(ProviderKind),

    #[error("provider not configured: {0}")]
    ProviderNotConfigured(ProviderKind),

    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("invalid OAuth state parameter")]
    CsrfStateMismatch,

    #[error("corrupt session data: {0}")]
    CorruptSession(String),

    #[error("failed to exchange authorization code: {0}")]
    ExchangeFailed(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Category reported on the `AuthFailed` event.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::ProviderUnavailable(_) | Self::ProviderNotConfigured(_) => {
                FailureKind::ProviderUnavailable
            }
            Self::MalformedCredential(_) => FailureKind::MalformedCredential,
            Self::CsrfStateMismatch => FailureKind::CsrfStateMismatch,
            Self::ExchangeFailed(_) => FailureKind::ExchangeFailed,
            Self::CorruptSession(_) | Self::Storage(_) => FailureKind::Internal,
        }
    }
}
