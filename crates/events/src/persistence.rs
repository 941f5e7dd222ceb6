//! Best-effort snapshot persistence.
//!
//! [`SnapshotPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel, mirrors the directory's durable contents (identities
//! and listings -- sessions deliberately do not survive a restart), and
//! rewrites the JSON snapshot file after every applied event. It runs as a
//! long-lived background task and shuts down when the bus sender is dropped.
//!
//! Writes happen entirely off the request path; a persistence failure is
//! logged and never affects in-memory state.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tradepost_core::{Identity, Listing};

use crate::bus::{self, DirectoryEvent};

// ---------------------------------------------------------------------------
// Snapshot format
// ---------------------------------------------------------------------------

/// On-disk snapshot of the directory's durable state.
///
/// Listings keep creation order; identity order carries no meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// Read a snapshot file, treating a missing or unreadable file as empty.
///
/// Matches the startup behaviour callers expect: a fresh deployment has no
/// snapshot yet, and a corrupt one must not prevent the service from
/// starting.
pub fn load_snapshot(path: &Path) -> DirectorySnapshot {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return DirectorySnapshot::default(),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Failed to read snapshot, starting empty");
            return DirectorySnapshot::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Snapshot did not parse, starting empty");
            DirectorySnapshot::default()
        }
    }
}

// ---------------------------------------------------------------------------
// SnapshotPersistence
// ---------------------------------------------------------------------------

/// Background service that mirrors directory mutations into a JSON file.
pub struct SnapshotPersistence {
    path: PathBuf,
    state: DirectorySnapshot,
}

impl SnapshotPersistence {
    /// Create a persistence service seeded with the state the directory was
    /// started from, so the first written file is already complete.
    pub fn new(path: impl Into<PathBuf>, initial: DirectorySnapshot) -> Self {
        Self {
            path: path.into(),
            state: initial,
        }
    }

    /// Run the persistence loop.
    ///
    /// Applies every received event to the mirror and rewrites the file.
    /// The loop exits when the channel is closed (i.e. every
    /// [`EventBus`](crate::bus::EventBus) handle is dropped).
    pub async fn run(mut self, mut receiver: broadcast::Receiver<DirectoryEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if self.apply(&event) {
                        if let Err(e) = self.write() {
                            tracing::error!(
                                error = %e,
                                event_type = %event.event_type,
                                path = %self.path.display(),
                                "Failed to write snapshot"
                            );
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Snapshot persistence lagged, the mirror is missing records"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, snapshot persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Fold one event into the mirror. Returns whether anything changed.
    fn apply(&mut self, event: &DirectoryEvent) -> bool {
        match event.event_type.as_str() {
            bus::IDENTITY_REGISTERED => {
                match serde_json::from_value::<Identity>(event.payload.clone()) {
                    Ok(identity) => {
                        self.state.identities.push(identity);
                        true
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "identity.registered payload did not parse");
                        false
                    }
                }
            }
            bus::LISTING_CREATED => match serde_json::from_value::<Listing>(event.payload.clone())
            {
                Ok(listing) => {
                    self.state.listings.push(listing);
                    true
                }
                Err(e) => {
                    tracing::warn!(error = %e, "listing.created payload did not parse");
                    false
                }
            },
            other => {
                tracing::debug!(event_type = other, "Event carries no durable state, ignoring");
                false
            }
        }
    }

    /// Rewrite the snapshot file via temp-file-then-rename, so a crash
    /// mid-write never leaves a truncated snapshot behind.
    fn write(&self) -> io::Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.state)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
