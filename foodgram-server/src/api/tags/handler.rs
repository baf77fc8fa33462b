//! Tag API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::Tag;
use crate::db::repository::tag;
use crate::utils::{AppError, AppResult};

/// GET /api/tags - all tags
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = tag::find_all(&state.pool).await?;
    Ok(Json(tags))
}

/// GET /api/tags/:id - single tag
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Tag>> {
    let t = tag::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tag {} not found", id)))?;
    Ok(Json(t))
}
