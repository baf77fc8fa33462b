//! Auth extractors
//!
//! Handlers take the caller explicitly: [`CurrentUser`] rejects anonymous
//! requests with 401, [`OptionalUser`] lets them through with `None` (the
//! recipe listing needs this for the silently-ignored filter flags).

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::AppError;

/// Caller identity when a request may be anonymous
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

/// Validate the bearer token and load the user row behind it.
///
/// The database lookup keeps the admin flag fresh and drops tokens whose
/// user no longer exists.
async fn authenticate(parts: &mut Parts, state: &ServerState) -> Result<CurrentUser, AppError> {
    // Check if already extracted on this request
    if let Some(u) = parts.extensions.get::<CurrentUser>() {
        return Ok(u.clone());
    }

    let header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?;

    let claims = state.jwt.validate_token(token).map_err(|e| match e {
        JwtError::ExpiredToken => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;

    let user_id: i64 = claims.sub.parse().map_err(|_| AppError::InvalidToken)?;
    let row = user::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    let user = CurrentUser {
        id: row.id,
        username: row.username,
        is_admin: row.is_admin,
    };

    // Store for potential reuse by other extractors on the same request
    parts.extensions.insert(user.clone());
    Ok(user)
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await
    }
}

impl FromRequestParts<ServerState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get(http::header::AUTHORIZATION).is_none() {
            return Ok(OptionalUser(None));
        }
        // A token was presented: a bad one is an error, not anonymity
        let user = authenticate(parts, state).await?;
        Ok(OptionalUser(Some(user)))
    }
}
