//! Tradepost event bus and snapshot persistence.
//!
//! Building blocks for the fire-and-forget durability policy:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DirectoryEvent`] — the canonical mutation-notification envelope.
//! - [`SnapshotPersistence`] — background service that mirrors the directory
//!   contents and rewrites the JSON snapshot file after every event.

pub mod bus;
pub mod persistence;

pub use bus::{DirectoryEvent, EventBus};
pub use persistence::{load_snapshot, DirectorySnapshot, SnapshotPersistence};
