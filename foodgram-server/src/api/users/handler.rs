//! User & Subscription API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::convert::{self, SubscriptionView, UserView};
use crate::auth::{CurrentUser, OptionalUser};
use crate::core::ServerState;
use crate::db::models::{SetPassword, UserCreate};
use crate::db::repository::{RepoError, subscription, user};
use crate::utils::validation::check_username;
use crate::utils::{AppError, AppResult, FieldErrors, Page, PageQuery};

/// POST /api/users - register a new user
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    let mut errors: FieldErrors = payload.validate().err().map(Into::into).unwrap_or_default();
    check_username(&mut errors, &payload.username);

    // Collected with the rest so the client sees every problem at once;
    // the unique constraints close the remaining race
    if user::find_by_email(&state.pool, &payload.email).await?.is_some() {
        errors.push("email", "A user with this email already exists");
    }
    if user::find_by_username(&state.pool, &payload.username)
        .await?
        .is_some()
    {
        errors.push("username", "A user with this username already exists");
    }
    errors.into_result()?;

    let password_hash = crate::auth::password::hash(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let created = user::create(
        &state.pool,
        &payload.email,
        &payload.username,
        &payload.first_name,
        &payload.last_name,
        &password_hash,
    )
    .await
    .map_err(|e| match e {
        // A racing registration slips past the pre-check and hits the unique
        // constraint; report it in the same field-level shape
        RepoError::Duplicate(msg) => duplicate_user_error(&msg),
        other => AppError::from(other),
    })?;

    tracing::info!(user_id = created.id, username = %created.username, "User registered");

    Ok((StatusCode::CREATED, Json(UserView::new(&created, false))))
}

/// GET /api/users - paginated user list
pub async fn list(
    State(state): State<ServerState>,
    OptionalUser(viewer): OptionalUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<UserView>>> {
    let limit = query.limit(state.config.page_size);
    let (users, count) =
        user::list(&state.pool, i64::from(limit), query.offset(state.config.page_size)).await?;

    let subscribed = match &viewer {
        Some(u) => {
            let ids: Vec<i64> = users.iter().map(|x| x.id).collect();
            subscription::subscribed_ids(&state.pool, u.id, &ids).await?
        }
        None => Default::default(),
    };

    let views = users
        .iter()
        .map(|u| UserView::new(u, subscribed.contains(&u.id)))
        .collect();

    Ok(Json(Page::new(
        "/api/users/",
        &query,
        state.config.page_size,
        "",
        count,
        views,
    )))
}

/// GET /api/users/me - the authenticated caller
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserView>> {
    let row = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(UserView::new(&row, false)))
}

/// GET /api/users/:id - single user profile
pub async fn get_by_id(
    State(state): State<ServerState>,
    OptionalUser(viewer): OptionalUser,
    Path(id): Path<i64>,
) -> AppResult<Json<UserView>> {
    let row = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    let is_subscribed = match &viewer {
        Some(u) => subscription::exists(&state.pool, u.id, id).await?,
        None => false,
    };
    Ok(Json(UserView::new(&row, is_subscribed)))
}

/// POST /api/users/set_password - change the caller's password
pub async fn set_password(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<SetPassword>,
) -> AppResult<StatusCode> {
    let errors: FieldErrors = payload.validate().err().map(Into::into).unwrap_or_default();
    errors.into_result()?;

    let row = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let current_ok = row
        .verify_password(&payload.current_password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !current_ok {
        return Err(AppError::validation(
            "current_password",
            "Current password is incorrect",
        ));
    }

    let password_hash = crate::auth::password::hash(&payload.new_password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
    user::update_password(&state.pool, current_user.id, &password_hash).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Field-level validation error for a unique-constraint hit on the users
/// table (message names the column, e.g. "UNIQUE constraint failed: users.email")
fn duplicate_user_error(msg: &str) -> AppError {
    let field = if msg.contains("username") {
        "username"
    } else {
        "email"
    };
    AppError::validation(field, format!("A user with this {field} already exists"))
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Truncates each author's recipe slice; absent means all recipes
    pub recipes_limit: Option<i64>,
}

/// GET /api/users/subscriptions - authors the caller follows
pub async fn subscriptions(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Query(query): Query<SubscriptionsQuery>,
) -> AppResult<Json<Page<SubscriptionView>>> {
    let page_query = PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let limit = page_query.limit(state.config.page_size);
    let (authors, count) = subscription::authors(
        &state.pool,
        current_user.id,
        i64::from(limit),
        page_query.offset(state.config.page_size),
    )
    .await?;

    let mut views = Vec::with_capacity(authors.len());
    for author in &authors {
        views.push(convert::subscription_view(&state.pool, author, query.recipes_limit).await?);
    }

    let extra = query
        .recipes_limit
        .map(|l| format!("recipes_limit={l}"))
        .unwrap_or_default();

    Ok(Json(Page::new(
        "/api/users/subscriptions/",
        &page_query,
        state.config.page_size,
        &extra,
        count,
        views,
    )))
}

/// POST /api/users/:id/subscribe - follow an author
pub async fn subscribe(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Query(query): Query<SubscriptionsQuery>,
) -> AppResult<(StatusCode, Json<SubscriptionView>)> {
    let author = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    if author.id == current_user.id {
        return Err(AppError::validation(
            "author",
            "Subscribing to yourself is not allowed",
        ));
    }

    // The unique constraint turns a concurrent duplicate into the same error
    subscription::add(&state.pool, current_user.id, author.id).await?;

    tracing::info!(user_id = current_user.id, author_id = author.id, "Subscribed");

    let view = convert::subscription_view(&state.pool, &author, query.recipes_limit).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// DELETE /api/users/:id/subscribe - unfollow an author
pub async fn unsubscribe(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;

    let removed = subscription::remove(&state.pool, current_user.id, id).await?;
    if !removed {
        return Err(AppError::not_found("Subscription not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
