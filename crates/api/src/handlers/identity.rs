//! Handlers for the `/identities` resource (registration).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tradepost_core::IdentityPublic;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /identities`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub secret: String,
}

/// POST /api/v1/identities
///
/// Register a new identity. Returns the public fields only -- the secret
/// hash never leaves the core.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<IdentityPublic>)> {
    if input.email.is_empty() || input.secret.is_empty() {
        return Err(AppError::BadRequest(
            "email and secret are required".to_string(),
        ));
    }

    let identity = state.directory.register(&input.email, &input.secret).await?;
    Ok((StatusCode::CREATED, Json(identity)))
}
