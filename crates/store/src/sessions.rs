//! Session issuance and resolution.
//!
//! Tokens are opaque random strings (256 bits of entropy, hex-encoded);
//! only their SHA-256 digest is kept server-side, so a leaked session map
//! does not compromise live bearers. Every session carries an expiry and a
//! revocation flag, both checked at resolve time.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tradepost_core::types::{EntityId, Timestamp};
use tradepost_core::{CoreError, Session};

/// Default session lifetime.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// A freshly issued session: the plaintext token (shown to the caller once)
/// and when it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Generate a cryptographically random session token (32 bytes, hex).
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compute the SHA-256 hex digest of a token.
///
/// Used both to key the session map at issuance and to look up an incoming
/// bearer token -- the plaintext never touches the map.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// The token-to-session map. The single authorization gate for writes.
pub struct SessionRegistry {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    /// Create a registry with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(DEFAULT_TTL_HOURS))
    }

    /// Create a registry with a specific TTL. Mostly for tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a session for an identity and return the plaintext token.
    ///
    /// An identity may hold any number of concurrent sessions.
    pub async fn issue(&self, identity_id: EntityId) -> IssuedSession {
        let token = generate_token();
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let session = Session {
            identity_id,
            issued_at: now,
            expires_at,
            revoked: false,
        };
        self.sessions.write().await.insert(hash_token(&token), session);

        IssuedSession { token, expires_at }
    }

    /// Resolve a bearer token to its identity id.
    ///
    /// Fails with [`CoreError::Unauthorized`] for tokens that are unknown,
    /// garbled, expired, or revoked.
    pub async fn resolve(&self, token: &str) -> Result<EntityId, CoreError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&hash_token(token))
            .ok_or_else(|| CoreError::Unauthorized("Unknown session token".to_string()))?;

        if !session.is_live(Utc::now()) {
            return Err(CoreError::Unauthorized(
                "Session has expired or been revoked".to_string(),
            ));
        }
        Ok(session.identity_id)
    }

    /// Revoke every live session of an identity. Returns how many were hit.
    pub async fn revoke_all_for_identity(&self, identity_id: EntityId) -> usize {
        let mut sessions = self.sessions.write().await;
        let mut revoked = 0;
        for session in sessions.values_mut() {
            if session.identity_id == identity_id && !session.revoked {
                session.revoked = true;
                revoked += 1;
            }
        }
        revoked
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
