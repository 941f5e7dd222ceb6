//! The append-oriented listing collection.

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tradepost_core::listing::coerce_coordinate;
use tradepost_core::types::EntityId;
use tradepost_core::{CoreError, Listing, ListingDraft};
use uuid::Uuid;

/// All published listings, in creation order.
///
/// Append-only: listings are immutable once stored, so the vec itself is the
/// creation-order index the query engine relies on.
pub struct ListingStore {
    listings: RwLock<Vec<Listing>>,
}

impl ListingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            listings: RwLock::new(Vec::new()),
        }
    }

    /// Validate, coerce, and append a new listing.
    ///
    /// Fails with [`CoreError::MissingFields`] when `title` or `category` is
    /// empty; coordinates never fail (they coerce to `0.0`). The id,
    /// timestamp, and append happen under one write lock, so concurrent
    /// callers cannot lose or duplicate listings.
    pub async fn create(&self, owner_id: EntityId, draft: ListingDraft) -> Result<Listing, CoreError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(CoreError::MissingFields(missing.join(", ")));
        }

        let latitude = coerce_coordinate(&draft.lat);
        let longitude = coerce_coordinate(&draft.lng);

        let mut listings = self.listings.write().await;

        // Creation timestamps are strictly increasing: if the clock has not
        // advanced past the previous append, nudge forward by a microsecond.
        let mut created_at = Utc::now();
        if let Some(last) = listings.last() {
            if created_at <= last.created_at {
                created_at = last.created_at + Duration::microseconds(1);
            }
        }

        let listing = Listing {
            id: Uuid::new_v4(),
            owner_id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            offer: draft.offer,
            latitude,
            longitude,
            created_at,
        };
        listings.push(listing.clone());
        Ok(listing)
    }

    /// A consistent point-in-time copy of all listings, in creation order.
    pub async fn snapshot(&self) -> Vec<Listing> {
        self.listings.read().await.clone()
    }

    /// Seed the store from a persistence snapshot. Replaces current contents.
    pub async fn load(&self, listings: Vec<Listing>) {
        *self.listings.write().await = listings;
    }

    /// Number of stored listings.
    pub async fn count(&self) -> usize {
        self.listings.read().await.len()
    }
}

impl Default for ListingStore {
    fn default() -> Self {
        Self::new()
    }
}
