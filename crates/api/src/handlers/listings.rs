//! Handlers for the `/listings` resource (publish, discover).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tradepost_core::{GeoFilter, GeoPoint, Listing, ListingDraft, ListingFilter};

use crate::error::AppResult;
use crate::middleware::auth::BearerToken;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /listings`.
///
/// Coordinates arrive as strings so that a malformed value degrades to "no
/// geo filter" instead of a 400 rejection.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoverParams {
    pub category: Option<String>,
    /// Free-text needle, matched against title and description.
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
}

/// Parse one coordinate parameter, rejecting non-finite values.
fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    let parsed: f64 = value?.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

impl DiscoverParams {
    /// Build the core filter from the raw query string.
    ///
    /// Empty `category`/`q` values mean "no predicate". The radius predicate
    /// is all-or-nothing: it exists only when lat, lng, and radius are all
    /// present and parse -- partial or garbled coordinates silently disable
    /// geo filtering rather than degenerating into a zero-radius match.
    fn into_filter(self) -> ListingFilter {
        let geo = self.geo_filter();
        ListingFilter {
            category: self.category.filter(|c| !c.is_empty()),
            text: self.q.filter(|q| !q.is_empty()),
            geo,
        }
    }

    fn geo_filter(&self) -> Option<GeoFilter> {
        let latitude = parse_coordinate(self.lat.as_deref())?;
        let longitude = parse_coordinate(self.lng.as_deref())?;
        let radius_km = parse_coordinate(self.radius.as_deref())?;
        Some(GeoFilter {
            center: GeoPoint::new(latitude, longitude),
            radius_km,
        })
    }
}

/// POST /api/v1/listings
///
/// Publish a listing under the identity the bearer token resolves to.
pub async fn create(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(draft): Json<ListingDraft>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    let listing = state.directory.create_listing(&token, draft).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/v1/listings
///
/// Discover listings through any combination of category, text, and radius
/// filters. Public; never fails on well-formed requests.
pub async fn discover(
    State(state): State<AppState>,
    Query(params): Query<DiscoverParams>,
) -> AppResult<Json<DataResponse<Vec<Listing>>>> {
    let filter = params.into_filter();
    let listings = state.directory.discover(&filter).await;
    Ok(Json(DataResponse { data: listings }))
}
