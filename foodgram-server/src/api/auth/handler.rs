//! Authentication Handlers
//!
//! Token issuance for registered users

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

/// POST /api/auth/token/login - exchange credentials for a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let row = user::find_by_email(&state.pool, &req.email).await?;

    // Uniform error for unknown email and bad password, no user enumeration
    let row = match row {
        Some(u) => u,
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid("Invalid email or password"));
        }
    };

    let password_valid = row
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(email = %req.email, "Login failed - invalid credentials");
        return Err(AppError::invalid("Invalid email or password"));
    }

    let token = state
        .jwt
        .generate_token(row.id, &row.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = row.id, username = %row.username, "User logged in");

    Ok(Json(TokenResponse { auth_token: token }))
}

/// POST /api/auth/token/logout - 204 for an authenticated caller.
///
/// Tokens are stateless; the client discards its copy and the token ages out.
pub async fn logout(_user: CurrentUser) -> StatusCode {
    StatusCode::NO_CONTENT
}
