//! Read representations
//!
//! Builders turning model rows into the API shapes. Create and update
//! responses go through the same builders as GET, so a write answers with
//! exactly what a subsequent read would return.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::models::{IngredientAmount, Recipe, RecipeSummary, Tag, User};
use crate::db::repository::{RecipeMark, recipe, recipe_mark, subscription, user};
use crate::utils::{AppError, AppResult};

/// User as rendered by the API; `is_subscribed` is relative to the caller
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl UserView {
    pub fn new(user: &User, is_subscribed: bool) -> Self {
        Self {
            email: user.email.clone(),
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_subscribed,
        }
    }
}

/// Full recipe read representation
#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub id: i64,
    pub tags: Vec<Tag>,
    pub author: UserView,
    pub ingredients: Vec<IngredientAmount>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i64,
}

/// Subscription listing entry: author plus a bounded slice of their recipes
#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}

/// Render a page of recipes for an optionally-authenticated viewer.
///
/// Favorite/cart flags are resolved with one query per relation for the whole
/// page; tags and ingredient lines are loaded per recipe.
pub async fn recipe_views(
    pool: &SqlitePool,
    recipes: &[Recipe],
    viewer: Option<i64>,
) -> AppResult<Vec<RecipeView>> {
    let recipe_ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let author_ids: Vec<i64> = recipes.iter().map(|r| r.author_id).collect();

    let (favorited, in_cart, subscribed) = match viewer {
        Some(user_id) => (
            recipe_mark::marked_ids(pool, RecipeMark::Favorite, user_id, &recipe_ids).await?,
            recipe_mark::marked_ids(pool, RecipeMark::ShoppingCart, user_id, &recipe_ids).await?,
            subscription::subscribed_ids(pool, user_id, &author_ids).await?,
        ),
        None => Default::default(),
    };

    let mut authors: HashMap<i64, User> = HashMap::new();
    let mut views = Vec::with_capacity(recipes.len());
    for r in recipes {
        if !authors.contains_key(&r.author_id) {
            let author = user::find_by_id(pool, r.author_id)
                .await?
                .ok_or_else(|| AppError::internal(format!("Recipe {} has no author row", r.id)))?;
            authors.insert(r.author_id, author);
        }
        let author = &authors[&r.author_id];

        views.push(RecipeView {
            id: r.id,
            tags: recipe::tags_for(pool, r.id).await?,
            author: UserView::new(author, subscribed.contains(&r.author_id)),
            ingredients: recipe::ingredients_for(pool, r.id).await?,
            is_favorited: favorited.contains(&r.id),
            is_in_shopping_cart: in_cart.contains(&r.id),
            name: r.name.clone(),
            image: r.image.clone(),
            text: r.text.clone(),
            cooking_time: r.cooking_time,
        });
    }
    Ok(views)
}

/// Render a single recipe
pub async fn recipe_view(
    pool: &SqlitePool,
    recipe: &Recipe,
    viewer: Option<i64>,
) -> AppResult<RecipeView> {
    let mut views = recipe_views(pool, std::slice::from_ref(recipe), viewer).await?;
    views
        .pop()
        .ok_or_else(|| AppError::internal("Empty recipe view batch".to_string()))
}

/// Render a subscription entry. Listing implies an existing subscription, so
/// `is_subscribed` is always true here.
pub async fn subscription_view(
    pool: &SqlitePool,
    author: &User,
    recipes_limit: Option<i64>,
) -> AppResult<SubscriptionView> {
    Ok(SubscriptionView {
        user: UserView::new(author, true),
        recipes: recipe::summaries_for_author(pool, author.id, recipes_limit).await?,
        recipes_count: recipe::count_for_author(pool, author.id).await?,
    })
}
