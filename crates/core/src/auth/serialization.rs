//! Versioned JSON schema for the persisted identity.
//!
//! The stored blob is `{"version": 1, "id": .., "name": .., "email": ..,
//! "picture": .., "provider": ..}`. Anything that does not parse, or that
//! carries another version, is reported as `CorruptSession`. Blobs without a
//! `version` field predate versioning and are read as version 1.

use serde::{Deserialize, Serialize};

use super::{AuthError, Identity, Result};

/// Schema version written by this build.
pub const IDENTITY_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct PersistedIdentityRef<'a> {
    version: u32,
    #[serde(flatten)]
    identity: &'a Identity,
}

#[derive(Deserialize)]
struct PersistedIdentity {
    version: Option<u32>,
    #[serde(flatten)]
    identity: Identity,
}

/// Serializes an identity to its persisted JSON form.
pub fn serialize_identity(identity: &Identity) -> Result<String> {
    serde_json::to_string(&PersistedIdentityRef {
        version: IDENTITY_SCHEMA_VERSION,
        identity,
    })
    .map_err(|e| AuthError::Storage(e.to_string()))
}

/// Deserializes a persisted identity, validating the schema version.
pub fn deserialize_identity(raw: &str) -> Result<Identity> {
    let persisted: PersistedIdentity =
        serde_json::from_str(raw).map_err(|e| AuthError::CorruptSession(e.to_string()))?;

    let version = persisted.version.unwrap_or(IDENTITY_SCHEMA_VERSION);
    if version != IDENTITY_SCHEMA_VERSION {
        return Err(AuthError::CorruptSession(format!(
            "unsupported schema version {version}"
        )));
    }

    let identity = persisted.identity;
    if identity.id.trim().is_empty() {
        return Err(AuthError::CorruptSession("empty identity id".to_string()));
    }

    Ok(identity)
}
