//! Ingredient API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Ingredient;
use crate::db::repository::ingredient;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct IngredientQuery {
    /// Case-insensitive name prefix
    pub name: Option<String>,
}

/// GET /api/ingredients?name= - ingredients, optionally prefix-filtered
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<IngredientQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = ingredient::search(&state.pool, query.name.as_deref()).await?;
    Ok(Json(ingredients))
}

/// GET /api/ingredients/:id - single ingredient
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Ingredient>> {
    let i = ingredient::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {} not found", id)))?;
    Ok(Json(i))
}
