//! Listing model, draft input, and the lenient coordinate-coercion policy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{EntityId, Timestamp};

/// A published offer/post with category, free text, and coordinates.
///
/// Immutable after creation. Owned exclusively by the listing store;
/// query results carry clones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: EntityId,
    /// The identity that created the listing (by id, not by live reference).
    pub owner_id: EntityId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// What the poster wants in exchange. Free text, may be empty.
    pub offer: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: Timestamp,
}

/// Caller-supplied fields for a new listing.
///
/// `title` and `category` are required (the store rejects empty values);
/// everything else defaults. Coordinates are accepted as any JSON value and
/// coerced via [`coerce_coordinate`] -- bad coordinates are never an error.
#[derive(Debug, Default, Deserialize)]
pub struct ListingDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub offer: String,
    #[serde(default)]
    pub lat: Value,
    #[serde(default)]
    pub lng: Value,
}

impl ListingDraft {
    /// Names of required fields that are empty, in declaration order.
    ///
    /// Empty means the empty string; whitespace-only values are accepted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push("title");
        }
        if self.category.is_empty() {
            missing.push("category");
        }
        missing
    }
}

/// Coerce a caller-supplied coordinate to a float, substituting `0.0` for
/// anything absent or non-numeric.
///
/// Numeric strings are accepted alongside JSON numbers; non-finite values
/// coerce to `0.0` so stored listings always serialize. This conflates "no
/// location" with the equator/prime-meridian intersection; the trade-off is
/// documented in the design notes and preserved deliberately.
pub fn coerce_coordinate(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .parse()
            .ok()
            .filter(|f: &f64| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}
