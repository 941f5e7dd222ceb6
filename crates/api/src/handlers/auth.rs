//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tradepost_core::types::Timestamp;

use crate::error::AppResult;
use crate::middleware::auth::BearerToken;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub secret: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque bearer token; present it on write requests.
    pub token: String,
    /// When the session stops being valid.
    pub expires_at: Timestamp,
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + secret. Returns a fresh session token; an
/// unknown email and a wrong secret produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state.directory.authenticate(&input.email, &input.secret).await?;
    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions of the calling identity. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<StatusCode> {
    state.directory.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
