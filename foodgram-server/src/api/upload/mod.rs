//! Image upload API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/upload", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/image", post(handler::upload_image))
}
