//! Registered identities and Argon2id secret hashing.
//!
//! All secret hashes use the Argon2id variant with a cryptographically
//! random salt generated via `OsRng`. The PHC string format is used for
//! storage so that algorithm parameters and salt travel with the hash --
//! verification always re-derives with exactly the registration parameters.

use std::collections::HashMap;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tokio::sync::RwLock;
use tradepost_core::{CoreError, Identity};
use uuid::Uuid;

/// Hash a plaintext secret using Argon2id with a random salt.
fn hash_secret(raw_secret: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(raw_secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext secret against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the secret matches, `Ok(false)` if it does not.
fn verify_secret(raw_secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(raw_secret.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// The registered-identity collection, keyed by email.
///
/// Emails are compared case-sensitively and exactly; uniqueness is enforced
/// under the write lock so concurrent registrations can never both succeed.
pub struct CredentialStore {
    identities: RwLock<HashMap<String, Identity>>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new identity.
    ///
    /// Fails with [`CoreError::DuplicateIdentity`] if the email is taken.
    /// The duplicate check and the insert happen under one write lock, so
    /// the uniqueness invariant holds under concurrent callers.
    pub async fn register(&self, email: &str, raw_secret: &str) -> Result<Identity, CoreError> {
        let mut identities = self.identities.write().await;
        if identities.contains_key(email) {
            return Err(CoreError::DuplicateIdentity);
        }

        let secret_hash = hash_secret(raw_secret)
            .map_err(|e| CoreError::Internal(format!("Secret hashing error: {e}")))?;

        let identity = Identity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            secret_hash,
        };
        identities.insert(email.to_string(), identity.clone());
        Ok(identity)
    }

    /// Authenticate an email/secret pair.
    ///
    /// Fails with [`CoreError::InvalidCredentials`] whether the email is
    /// unknown or the secret is wrong -- the caller cannot tell which.
    pub async fn authenticate(&self, email: &str, raw_secret: &str) -> Result<Identity, CoreError> {
        // Clone out of the map so the (slow) verification runs lock-free.
        let identity = {
            let identities = self.identities.read().await;
            identities
                .get(email)
                .cloned()
                .ok_or(CoreError::InvalidCredentials)?
        };

        let valid = verify_secret(raw_secret, &identity.secret_hash)
            .map_err(|e| CoreError::Internal(format!("Secret verification error: {e}")))?;
        if !valid {
            return Err(CoreError::InvalidCredentials);
        }
        Ok(identity)
    }

    /// Seed the store from a persistence snapshot. Replaces current contents.
    pub async fn load(&self, identities: Vec<Identity>) {
        let mut map = self.identities.write().await;
        map.clear();
        for identity in identities {
            map.insert(identity.email.clone(), identity);
        }
    }

    /// All identities, for the persistence snapshot. Order carries no meaning.
    pub async fn export(&self) -> Vec<Identity> {
        self.identities.read().await.values().cloned().collect()
    }

    /// Number of registered identities.
    pub async fn count(&self) -> usize {
        self.identities.read().await.len()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
