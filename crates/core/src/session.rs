//! Session model.

use crate::types::{EntityId, Timestamp};

/// A live session bound to one identity.
///
/// Stored keyed by the SHA-256 digest of the opaque bearer token; the
/// plaintext token is returned to the caller once at issuance and never
/// retained. Sessions are held in memory only -- they deliberately do not
/// survive a process restart.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity_id: EntityId,
    pub issued_at: Timestamp,
    /// Checked at resolve time; a session past this instant is dead.
    pub expires_at: Timestamp,
    /// Set by logout; checked at resolve time.
    pub revoked: bool,
}

impl Session {
    /// Whether this session authorizes requests at instant `now`.
    pub fn is_live(&self, now: Timestamp) -> bool {
        !self.revoked && now < self.expires_at
    }
}
