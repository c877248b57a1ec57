use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use rand::{distr::Alphanumeric, Rng};
use serde::Deserialize;

use super::{AuthError, Identity, ProviderKind, Result};
use crate::serde::deserialize_optional_string;

/// Base64url engine that accepts tokens with or without trailing padding.
const BASE64_URL_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Generate a random state parameter for CSRF protection.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Claims read from an implicit-flow ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub picture: Option<String>,
}

/// Decode the payload segment of a JWT without verifying its signature.
///
/// Signature verification belongs on a server; the client only needs the
/// profile claims to render who signed in.
pub fn decode_id_token_claims(token: &str) -> Result<IdTokenClaims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if segments.next().is_none() && !payload.is_empty() => {
            payload
        }
        _ => {
            return Err(AuthError::MalformedCredential(
                "token must have three segments".to_string(),
            ))
        }
    };

    let decoded = BASE64_URL_LENIENT
        .decode(payload)
        .map_err(|e| AuthError::MalformedCredential(e.to_string()))?;

    let claims: IdTokenClaims = serde_json::from_slice(&decoded)
        .map_err(|e| AuthError::MalformedCredential(e.to_string()))?;

    if claims.sub.trim().is_empty() {
        return Err(AuthError::MalformedCredential(
            "missing required claim: sub".to_string(),
        ));
    }

    Ok(claims)
}

/// Map ID token claims onto an identity for the given provider.
///
/// Falls back to the email's local part, then to the subject, when the token
/// carries no display name.
pub fn claims_to_identity(claims: IdTokenClaims, provider: ProviderKind) -> Identity {
    let name = claims
        .name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| claims.email.as_deref().map(email_to_name))
        .unwrap_or_else(|| claims.sub.clone());

    Identity {
        id: claims.sub,
        name,
        email: claims.email,
        picture_url: claims.picture,
        provider,
    }
}

/// Extract username from email if no name provided.
pub fn email_to_name(email: &str) -> String {
    match email.split('@').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "User".to_string(),
    }
}

/// Compare the state received on a callback against the stored one.
pub fn verify_state(expected: Option<&str>, received: &str) -> Result<()> {
    match expected {
        Some(expected) if !expected.is_empty() && expected == received => Ok(()),
        _ => Err(AuthError::CsrfStateMismatch),
    }
}

/// Message shown when a provider could not start a sign-in.
pub fn initiation_failure_message(provider: ProviderKind) -> String {
    match provider {
        ProviderKind::Google => "Google Sign-In is not loaded".to_string(),
        ProviderKind::GitHub => "GitHub Sign-In failed".to_string(),
    }
}

/// Message shown when a provider callback could not be turned into a session.
pub fn callback_failure_message(provider: ProviderKind) -> String {
    format!(
        "Failed to process {} authentication",
        provider.display_name()
    )
}
