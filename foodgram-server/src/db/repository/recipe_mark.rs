//! Favorite / shopping-cart rows
//!
//! The two relations are structurally identical (user, recipe) pairs, so one
//! set of functions is parameterized by [`RecipeMark`]. Uniqueness lives in a
//! database constraint: a concurrent duplicate insert fails there and is
//! surfaced as the same duplicate error as the pre-check.

use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::ShoppingItem;

/// Which (user, recipe) relation to operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeMark {
    Favorite,
    ShoppingCart,
}

impl RecipeMark {
    fn table(self) -> &'static str {
        match self {
            RecipeMark::Favorite => "favorites",
            RecipeMark::ShoppingCart => "shopping_carts",
        }
    }

    /// Human label used in error messages
    pub fn label(self) -> &'static str {
        match self {
            RecipeMark::Favorite => "favorites",
            RecipeMark::ShoppingCart => "shopping cart",
        }
    }
}

/// Insert the (user, recipe) pair; duplicate pairs surface as `Duplicate`
pub async fn add(
    pool: &SqlitePool,
    mark: RecipeMark,
    user_id: i64,
    recipe_id: i64,
) -> RepoResult<()> {
    let sql = format!(
        "INSERT INTO {} (user_id, recipe_id) VALUES (?, ?)",
        mark.table()
    );
    sqlx::query(&sql)
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => {
                RepoError::Duplicate(format!("Recipe already in {}", mark.label()))
            }
            other => other,
        })?;
    Ok(())
}

/// Delete the (user, recipe) pair; `false` when no row existed
pub async fn remove(
    pool: &SqlitePool,
    mark: RecipeMark,
    user_id: i64,
    recipe_id: i64,
) -> RepoResult<bool> {
    let sql = format!(
        "DELETE FROM {} WHERE user_id = ? AND recipe_id = ?",
        mark.table()
    );
    let result = sqlx::query(&sql)
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Of `recipe_ids`, the subset marked by `user_id` (for is_favorited /
/// is_in_shopping_cart flags on listings, one query per page)
pub async fn marked_ids(
    pool: &SqlitePool,
    mark: RecipeMark,
    user_id: i64,
    recipe_ids: &[i64],
) -> RepoResult<HashSet<i64>> {
    if recipe_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT recipe_id FROM {} WHERE user_id = ",
        mark.table()
    ));
    qb.push_bind(user_id).push(" AND recipe_id IN (");
    let mut sep = qb.separated(", ");
    for id in recipe_ids {
        sep.push_bind(*id);
    }
    qb.push(")");
    let ids: Vec<i64> = qb.build_query_scalar().fetch_all(pool).await?;
    Ok(ids.into_iter().collect())
}

/// Aggregate the caller's shopping cart: every ingredient row of every cart
/// recipe, grouped by (name, unit), amounts summed. Alphabetical by name so
/// the exported document is deterministic.
pub async fn shopping_list(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<ShoppingItem>> {
    let items = sqlx::query_as::<_, ShoppingItem>(
        "SELECT i.name AS name, i.measurement_unit AS measurement_unit, \
                SUM(ri.amount) AS total \
         FROM recipe_ingredients ri \
         JOIN ingredients i ON i.id = ri.ingredient_id \
         JOIN shopping_carts sc ON sc.recipe_id = ri.recipe_id \
         WHERE sc.user_id = ? \
         GROUP BY i.name, i.measurement_unit \
         ORDER BY i.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}
