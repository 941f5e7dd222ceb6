//! Discovery query engine.
//!
//! Pure predicate filtering over a listing snapshot. Each predicate is
//! independently optional and they compose conjunctively; the result keeps
//! the snapshot's (creation) order. No ranking, no index -- a linear scan is
//! the design point at this scale.

use crate::geo::{haversine_km, GeoPoint};
use crate::listing::Listing;

// ---------------------------------------------------------------------------
// Filter types
// ---------------------------------------------------------------------------

/// Geographic radius predicate.
///
/// Existence of this value is an atomic decision: the transport layer only
/// constructs one when latitude, longitude, and radius were all supplied, so
/// partial coordinates can never degenerate into a zero-radius match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub center: GeoPoint,
    pub radius_km: f64,
}

/// A discovery query: any combination of the three predicates.
///
/// The default value matches every listing.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Exact, case-sensitive match against `Listing::category`.
    pub category: Option<String>,
    /// Case-insensitive substring match against title OR description.
    pub text: Option<String>,
    /// Great-circle radius match against the listing's coordinates.
    pub geo: Option<GeoFilter>,
}

impl ListingFilter {
    /// Whether `listing` passes every supplied predicate.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(category) = &self.category {
            if listing.category != *category {
                return false;
            }
        }

        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let in_title = listing.title.to_lowercase().contains(&needle);
            let in_description = listing.description.to_lowercase().contains(&needle);
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(geo) = &self.geo {
            let at = GeoPoint::new(listing.latitude, listing.longitude);
            if haversine_km(geo.center, at) > geo.radius_km {
                return false;
            }
        }

        true
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Filter a snapshot, preserving its order.
///
/// Never fails on well-formed input; an empty filter returns the whole
/// snapshot.
pub fn discover(snapshot: &[Listing], filter: &ListingFilter) -> Vec<Listing> {
    snapshot
        .iter()
        .filter(|listing| filter.matches(listing))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
