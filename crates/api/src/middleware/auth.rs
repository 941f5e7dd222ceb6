//! Bearer-credential extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tradepost_core::CoreError;

use crate::error::AppError;

/// The raw bearer token from the `Authorization` header.
///
/// This extractor only parses the header; resolving the token to an
/// identity stays inside the directory, which is the single authorization
/// gate. A missing or garbled header is the same failure a garbled token
/// would be: `Unauthorized`.
///
/// ```ignore
/// async fn my_handler(BearerToken(token): BearerToken) -> AppResult<Json<()>> {
///     state.directory.create_listing(&token, draft).await?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        Ok(BearerToken(token.to_string()))
    }
}
