//! Shared fixtures for unit tests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use signin_core::auth::{Identity, ProviderKind};

/// An unsigned ID token carrying the given claims.
pub fn google_token(claims: serde_json::Value) -> String {
    format!(
        "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

pub fn identity(name: &str, provider: ProviderKind) -> Identity {
    let local = name.to_lowercase().replace(' ', ".");
    Identity {
        id: format!("{provider}-{local}"),
        name: name.to_string(),
        email: Some(format!("{local}@example.com")),
        picture_url: None,
        provider,
    }
}
