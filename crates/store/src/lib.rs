//! Tradepost in-memory storage layer.
//!
//! Owned, lock-guarded collections behind a [`Directory`] facade -- no
//! ambient globals, so the whole core is instantiable per test. Each
//! collection serializes its writers behind a coarse `RwLock`; readers run
//! concurrently with each other but never observe a half-inserted record.

pub mod credentials;
pub mod directory;
pub mod listings;
pub mod sessions;

pub use credentials::CredentialStore;
pub use directory::Directory;
pub use listings::ListingStore;
pub use sessions::{IssuedSession, SessionRegistry};
