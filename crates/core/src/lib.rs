//! Tradepost domain core.
//!
//! Domain types (identities, sessions, listings), the caller-facing error
//! taxonomy, geodesic distance, and the pure discovery query engine. This
//! crate has no internal dependencies and performs no I/O, so it can be used
//! by the storage layer, the API, and any future CLI tooling alike.

pub mod error;
pub mod geo;
pub mod identity;
pub mod listing;
pub mod query;
pub mod session;
pub mod types;

pub use error::CoreError;
pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use identity::{Identity, IdentityPublic};
pub use listing::{Listing, ListingDraft};
pub use query::{discover, GeoFilter, ListingFilter};
pub use session::Session;
