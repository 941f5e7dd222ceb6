pub mod auth;
pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /identities        POST  register (public)
///
/// /auth/login        POST  login (public)
/// /auth/logout       POST  logout (requires bearer token)
///
/// /listings          POST  publish (requires bearer token)
/// /listings          GET   discover (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/identities", post(handlers::identity::register))
        .nest("/auth", auth::router())
        .route(
            "/listings",
            post(handlers::listings::create).get(handlers::listings::discover),
        )
}
