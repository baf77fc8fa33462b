//! Recipe API Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::RecipeListQuery;
use crate::api::convert::{self, RecipeView};
use crate::auth::{CurrentUser, OptionalUser};
use crate::core::ServerState;
use crate::db::models::{Recipe, RecipeSummary, RecipeWrite};
use crate::db::repository::{RecipeMark, ingredient, recipe, recipe_mark, tag};
use crate::utils::validation::{MAX_NAME_LEN, check_required_text};
use crate::utils::{AppError, AppResult, FieldErrors, Page, image};

/// GET /api/recipes - paginated, filtered listing
pub async fn list(
    State(state): State<ServerState>,
    OptionalUser(viewer): OptionalUser,
    query: RecipeListQuery,
) -> AppResult<Json<Page<RecipeView>>> {
    let viewer_id = viewer.as_ref().map(|u| u.id);

    // The favorite/cart flags need a caller to filter against; for anonymous
    // requests they silently drop out instead of erroring
    let repo_query = recipe::RecipeQuery {
        author: query.author,
        tag_slugs: &query.tags,
        favorited_by: viewer_id.filter(|_| query.is_favorited),
        in_cart_of: viewer_id.filter(|_| query.is_in_shopping_cart),
        limit: i64::from(query.page.limit(state.config.page_size)),
        offset: query.page.offset(state.config.page_size),
    };

    let (recipes, count) = recipe::list(&state.pool, &repo_query).await?;
    let views = convert::recipe_views(&state.pool, &recipes, viewer_id).await?;

    Ok(Json(Page::new(
        "/api/recipes/",
        &query.page,
        state.config.page_size,
        &query.extra_query(),
        count,
        views,
    )))
}

/// GET /api/recipes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    OptionalUser(viewer): OptionalUser,
    Path(id): Path<i64>,
) -> AppResult<Json<RecipeView>> {
    let row = find_recipe(&state, id).await?;
    let view = convert::recipe_view(&state.pool, &row, viewer.map(|u| u.id)).await?;
    Ok(Json(view))
}

/// POST /api/recipes - create a recipe
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<RecipeWrite>,
) -> AppResult<(StatusCode, Json<RecipeView>)> {
    validate_write(&state, &payload).await?;
    let image_path = resolve_image(&state, payload.image.as_deref())?;

    let row = recipe::create(&state.pool, current_user.id, &payload, image_path.as_deref()).await?;

    tracing::info!(recipe_id = row.id, author_id = current_user.id, "Recipe created");

    // Always render through the read representation, identical to a GET
    let view = convert::recipe_view(&state.pool, &row, Some(current_user.id)).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PATCH /api/recipes/:id - update, replacing both association sets
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RecipeWrite>,
) -> AppResult<Json<RecipeView>> {
    let existing = find_recipe(&state, id).await?;
    if !current_user.can_edit(existing.author_id) {
        return Err(AppError::forbidden("Only the author may edit this recipe"));
    }

    validate_write(&state, &payload).await?;
    let image_path = resolve_image(&state, payload.image.as_deref())?;

    let row = recipe::update(&state.pool, id, &payload, image_path.as_deref()).await?;

    tracing::info!(recipe_id = id, user_id = current_user.id, "Recipe updated");

    let view = convert::recipe_view(&state.pool, &row, Some(current_user.id)).await?;
    Ok(Json(view))
}

/// DELETE /api/recipes/:id
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let existing = find_recipe(&state, id).await?;
    if !current_user.can_edit(existing.author_id) {
        return Err(AppError::forbidden("Only the author may delete this recipe"));
    }

    recipe::delete(&state.pool, id).await?;
    tracing::info!(recipe_id = id, user_id = current_user.id, "Recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/recipes/:id/favorite
pub async fn add_favorite(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    add_mark(&state, RecipeMark::Favorite, &current_user, id).await
}

/// DELETE /api/recipes/:id/favorite
pub async fn remove_favorite(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    remove_mark(&state, RecipeMark::Favorite, &current_user, id).await
}

/// POST /api/recipes/:id/shopping_cart
pub async fn add_to_cart(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    add_mark(&state, RecipeMark::ShoppingCart, &current_user, id).await
}

/// DELETE /api/recipes/:id/shopping_cart
pub async fn remove_from_cart(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    remove_mark(&state, RecipeMark::ShoppingCart, &current_user, id).await
}

/// GET /api/recipes/download_shopping_cart - plain-text shopping list
pub async fn download_shopping_cart(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Response> {
    let items = recipe_mark::shopping_list(&state.pool, current_user.id).await?;

    let mut body = String::from("Shopping list:\n");
    for item in &items {
        body.push_str(&format!(
            " {} - {}({})\n",
            item.name, item.total, item.measurement_unit
        ));
    }

    let disposition = format!(
        "attachment; filename={}",
        state.config.shopping_list_filename
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

// ── Internals ───────────────────────────────────────────────────────

async fn find_recipe(state: &ServerState, id: i64) -> AppResult<Recipe> {
    recipe::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {} not found", id)))
}

/// Validate a recipe write payload before touching the database.
///
/// Order matters: empty lists first, then referenced-ingredient existence
/// (a miss is 404, not 400), then the remaining field rules collected into
/// one response.
async fn validate_write(state: &ServerState, payload: &RecipeWrite) -> AppResult<()> {
    if payload.ingredients.is_empty() {
        return Err(AppError::validation(
            "ingredients",
            "At least one ingredient is required",
        ));
    }
    if payload.tags.is_empty() {
        return Err(AppError::validation("tags", "At least one tag is required"));
    }

    let ingredient_ids: Vec<i64> = payload.ingredients.iter().map(|i| i.id).collect();
    let found = ingredient::find_by_ids(&state.pool, &ingredient_ids).await?;
    let found_ids: HashSet<i64> = found.iter().map(|i| i.id).collect();
    if let Some(missing) = ingredient_ids.iter().find(|id| !found_ids.contains(id)) {
        return Err(AppError::not_found(format!(
            "Ingredient {} not found",
            missing
        )));
    }

    let mut errors = FieldErrors::new();

    let distinct: HashSet<i64> = ingredient_ids.iter().copied().collect();
    if distinct.len() != ingredient_ids.len() {
        errors.push("ingredients", "Ingredients must not repeat");
    }
    if payload.ingredients.iter().any(|i| i.amount < 1) {
        errors.push("ingredients", "Amount must be greater than zero");
    }

    let distinct_tags: HashSet<i64> = payload.tags.iter().copied().collect();
    if distinct_tags.len() != payload.tags.len() {
        errors.push("tags", "Tags must not repeat");
    }
    let found_tags = tag::find_by_ids(&state.pool, &payload.tags).await?;
    if found_tags.len() != distinct_tags.len() {
        errors.push("tags", "Unknown tag id");
    }

    check_required_text(&mut errors, &payload.name, "name", MAX_NAME_LEN);
    if payload.text.trim().is_empty() {
        errors.push("text", "text must not be empty");
    }
    if payload.cooking_time < 1 {
        errors.push("cooking_time", "Cooking time must be at least 1 minute");
    }

    errors.into_result()
}

/// Resolve the optional image field to a stored media path
fn resolve_image(state: &ServerState, value: Option<&str>) -> AppResult<Option<String>> {
    value
        .map(|v| image::resolve_image_field(&state.media_dir(), v))
        .transpose()
}

async fn add_mark(
    state: &ServerState,
    mark: RecipeMark,
    current_user: &CurrentUser,
    recipe_id: i64,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    let row = find_recipe(state, recipe_id).await?;

    // No pre-check: the unique constraint decides, so a concurrent duplicate
    // insert reports the same conflict as a repeated request
    recipe_mark::add(&state.pool, mark, current_user.id, recipe_id).await?;

    let summary = RecipeSummary {
        id: row.id,
        name: row.name,
        image: row.image,
        cooking_time: row.cooking_time,
    };
    Ok((StatusCode::CREATED, Json(summary)))
}

async fn remove_mark(
    state: &ServerState,
    mark: RecipeMark,
    current_user: &CurrentUser,
    recipe_id: i64,
) -> AppResult<StatusCode> {
    find_recipe(state, recipe_id).await?;

    let removed = recipe_mark::remove(&state.pool, mark, current_user.id, recipe_id).await?;
    if !removed {
        return Err(AppError::not_found(format!(
            "Recipe is not in {}",
            mark.label()
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
