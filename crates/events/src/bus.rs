//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the hub through which the directory announces successful
//! mutations. It is designed to be shared via `Arc<EventBus>`; publishing
//! never blocks and never waits on subscribers, which is what makes the
//! persistence policy fire-and-forget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tradepost_core::types::EntityId;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A new identity was registered. Payload: the full `Identity` (including
/// the secret hash -- the persistence mirror needs it to restore logins).
pub const IDENTITY_REGISTERED: &str = "identity.registered";

/// A new listing was created. Payload: the full `Listing`.
pub const LISTING_CREATED: &str = "listing.created";

// ---------------------------------------------------------------------------
// DirectoryEvent
// ---------------------------------------------------------------------------

/// Notification of a successful directory mutation.
///
/// Constructed via [`DirectoryEvent::new`] and enriched with
/// [`with_entity`](DirectoryEvent::with_entity) and
/// [`with_payload`](DirectoryEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEvent {
    /// Dot-separated event name, e.g. `"listing.created"`.
    pub event_type: String,

    /// Id of the entity the event concerns.
    pub entity_id: Option<EntityId>,

    /// Free-form JSON payload carrying the written record.
    pub payload: serde_json::Value,

    /// When the event was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DirectoryEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the subject entity's id.
    pub fn with_entity(mut self, entity_id: EntityId) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`DirectoryEvent`].
pub struct EventBus {
    sender: broadcast::Sender<DirectoryEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped -- a directory
    /// without a persistence service attached (e.g. in tests) stays valid.
    pub fn publish(&self, event: DirectoryEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
