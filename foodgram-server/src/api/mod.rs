//! API routing
//!
//! # Structure
//!
//! - [`auth`] - token login/logout
//! - [`users`] - registration, profiles, subscriptions
//! - [`tags`] - tag reference data
//! - [`ingredients`] - ingredient reference data
//! - [`recipes`] - recipes, favorites, shopping cart, list export
//! - [`upload`] - multipart image upload

pub mod convert;

pub mod auth;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod upload;
pub mod users;

use axum::Router;

use crate::core::ServerState;

/// The full API router (state attached by the server)
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(tags::router())
        .merge(ingredients::router())
        .merge(recipes::router())
        .merge(upload::router())
}
