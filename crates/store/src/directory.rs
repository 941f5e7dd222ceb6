//! The directory facade: the four public operations plus lifecycle glue.
//!
//! Owns the three collections and the event-bus handle. A write request
//! flows session registry -> credential store -> listing store; a discovery
//! request goes straight to the query engine over a listing snapshot. After
//! every successful mutation a [`DirectoryEvent`] is published and the call
//! returns immediately -- durability is the persistence subscriber's
//! problem, never the caller's latency.

use std::sync::Arc;

use chrono::Duration;
use tradepost_core::{
    discover, CoreError, Identity, IdentityPublic, Listing, ListingDraft, ListingFilter,
};
use tradepost_events::{bus, DirectoryEvent, EventBus};

use crate::credentials::CredentialStore;
use crate::listings::ListingStore;
use crate::sessions::{IssuedSession, SessionRegistry};

/// One instance of the whole storage core. Instantiable per test.
pub struct Directory {
    credentials: CredentialStore,
    sessions: SessionRegistry,
    listings: ListingStore,
    event_bus: Arc<EventBus>,
}

impl Directory {
    /// Create an empty directory with the default session TTL.
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            credentials: CredentialStore::new(),
            sessions: SessionRegistry::new(),
            listings: ListingStore::new(),
            event_bus,
        }
    }

    /// Create an empty directory with a specific session TTL.
    pub fn with_session_ttl(event_bus: Arc<EventBus>, ttl: Duration) -> Self {
        Self {
            sessions: SessionRegistry::with_ttl(ttl),
            ..Self::new(event_bus)
        }
    }

    /// Seed the stores from a persistence snapshot at startup.
    ///
    /// Sessions are not part of the snapshot; a restart invalidates every
    /// outstanding token.
    pub async fn load(&self, identities: Vec<Identity>, listings: Vec<Listing>) {
        self.credentials.load(identities).await;
        self.listings.load(listings).await;
    }

    /// Register a new identity and announce it.
    pub async fn register(
        &self,
        email: &str,
        raw_secret: &str,
    ) -> Result<IdentityPublic, CoreError> {
        let identity = self.credentials.register(email, raw_secret).await?;
        tracing::debug!(identity_id = %identity.id, "Registered identity");

        self.event_bus.publish(
            DirectoryEvent::new(bus::IDENTITY_REGISTERED)
                .with_entity(identity.id)
                .with_payload(serde_json::to_value(&identity).unwrap_or_default()),
        );
        Ok(IdentityPublic::from(&identity))
    }

    /// Authenticate and issue a session token.
    pub async fn authenticate(
        &self,
        email: &str,
        raw_secret: &str,
    ) -> Result<IssuedSession, CoreError> {
        let identity = self.credentials.authenticate(email, raw_secret).await?;
        let issued = self.sessions.issue(identity.id).await;
        tracing::debug!(identity_id = %identity.id, "Issued session");
        Ok(issued)
    }

    /// Publish a listing under the identity the token resolves to.
    ///
    /// The token resolution is the single authorization gate: it must
    /// succeed at the moment of this call, nothing more.
    pub async fn create_listing(
        &self,
        token: &str,
        draft: ListingDraft,
    ) -> Result<Listing, CoreError> {
        let owner_id = self.sessions.resolve(token).await?;
        let listing = self.listings.create(owner_id, draft).await?;
        tracing::debug!(listing_id = %listing.id, owner_id = %owner_id, "Created listing");

        self.event_bus.publish(
            DirectoryEvent::new(bus::LISTING_CREATED)
                .with_entity(listing.id)
                .with_payload(serde_json::to_value(&listing).unwrap_or_default()),
        );
        Ok(listing)
    }

    /// Filter a consistent snapshot of the listings. Never fails.
    pub async fn discover(&self, filter: &ListingFilter) -> Vec<Listing> {
        let snapshot = self.listings.snapshot().await;
        discover(&snapshot, filter)
    }

    /// Revoke every session of the identity the token resolves to.
    pub async fn logout(&self, token: &str) -> Result<usize, CoreError> {
        let identity_id = self.sessions.resolve(token).await?;
        let revoked = self.sessions.revoke_all_for_identity(identity_id).await;
        tracing::debug!(identity_id = %identity_id, revoked, "Revoked sessions");
        Ok(revoked)
    }

    /// Durable contents for the persistence snapshot.
    pub async fn export(&self) -> (Vec<Identity>, Vec<Listing>) {
        (self.credentials.export().await, self.listings.snapshot().await)
    }

    /// Number of registered identities.
    pub async fn identity_count(&self) -> usize {
        self.credentials.count().await
    }

    /// Number of stored listings.
    pub async fn listing_count(&self) -> usize {
        self.listings.count().await
    }
}
