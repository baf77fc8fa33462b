//! Recipe Model
//!
//! A recipe owns scalar fields plus two association sets: tags and ingredient
//! amounts. Both sets are replaced wholesale on update (clear-then-recreate),
//! never diffed.

use serde::{Deserialize, Serialize};

/// Recipe row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub image: Option<String>,
    pub cooking_time: i64,
    pub created_at: String,
}

/// One ingredient line of a recipe as rendered in the read representation
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IngredientAmount {
    /// Ingredient id (not the join-row id)
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Compact recipe used by favorite/cart responses and subscription listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i64,
}

/// One aggregated shopping-list line: amounts summed over every cart recipe
/// sharing (ingredient name, unit)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

/// Ingredient reference in a recipe write payload
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientAmountWrite {
    pub id: i64,
    pub amount: i64,
}

/// Recipe create/update payload.
///
/// Updates carry the full association sets: tags and ingredients present
/// before a write but omitted from it are gone afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeWrite {
    pub ingredients: Vec<IngredientAmountWrite>,
    pub tags: Vec<i64>,
    pub image: Option<String>,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
}
