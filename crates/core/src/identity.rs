//! Registered identity model.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// A registered identity (email + hashed secret).
///
/// Contains the secret hash -- NEVER serialize this to API responses
/// directly. Use [`IdentityPublic`] for external-facing output. The
/// `Serialize` impl exists for the persistence snapshot only.
///
/// Identities are created once at registration and never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    /// Unique across all identities; compared case-sensitively.
    pub email: String,
    /// Argon2id PHC string (algorithm parameters and salt embedded).
    pub secret_hash: String,
}

/// Safe identity representation for API responses (no secret hash).
#[derive(Debug, Clone, Serialize)]
pub struct IdentityPublic {
    pub id: EntityId,
    pub email: String,
}

impl From<&Identity> for IdentityPublic {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
        }
    }
}
