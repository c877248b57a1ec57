use thiserror::Error;

/// Auth errors for the signin_auth crate.
///
/// This wraps the core `AuthError` and adds crate-specific error variants
/// for setup and I/O that can't be in the functional core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (validation, token parsing, etc.)
    #[error(transparent)]
    Core(#[from] signin_core::auth::AuthError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Listener or socket error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
