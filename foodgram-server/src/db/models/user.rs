//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        crate::auth::password::verify(password, &self.password_hash)
    }
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 254, message = "Email is too long"))]
    pub email: String,
    pub username: String,
    #[validate(length(min = 1, max = 150, message = "First name must be 1-150 chars"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150, message = "Last name must be 1-150 chars"))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 chars"))]
    pub password: String,
}

/// Password change payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPassword {
    pub current_password: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 chars"))]
    pub new_password: String,
}
