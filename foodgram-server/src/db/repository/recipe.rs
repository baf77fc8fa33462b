//! Recipe Repository
//!
//! Owns the recipe write transaction: the scalar row and both association
//! sets (tags, ingredient amounts) change inside a single SQLite transaction,
//! so a failed write leaves the recipe exactly as it was.

use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use super::RepoResult;
use crate::db::models::{IngredientAmount, Recipe, RecipeSummary, RecipeWrite, Tag};

/// Filter set for the recipe listing. All clauses combine with AND;
/// `favorited_by` / `in_cart_of` are only populated for authenticated callers
/// (the handler drops the flags for anonymous requests).
#[derive(Debug, Default)]
pub struct RecipeQuery<'a> {
    pub author: Option<i64>,
    pub tag_slugs: &'a [String],
    pub favorited_by: Option<i64>,
    pub in_cart_of: Option<i64>,
    pub limit: i64,
    pub offset: i64,
}

fn push_filters<'a>(qb: &mut QueryBuilder<'a, Sqlite>, q: &'a RecipeQuery<'a>) {
    qb.push(" WHERE 1 = 1");
    if let Some(author) = q.author {
        qb.push(" AND r.author_id = ").push_bind(author);
    }
    if !q.tag_slugs.is_empty() {
        // Membership filter: at least one of the recipe's tags is in the set
        qb.push(
            " AND EXISTS (SELECT 1 FROM recipe_tags rt \
             JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.recipe_id = r.id AND t.slug IN (",
        );
        let mut sep = qb.separated(", ");
        for slug in q.tag_slugs {
            sep.push_bind(slug.as_str());
        }
        qb.push("))");
    }
    if let Some(user) = q.favorited_by {
        qb.push(" AND EXISTS (SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = ")
            .push_bind(user)
            .push(")");
    }
    if let Some(user) = q.in_cart_of {
        qb.push(
            " AND EXISTS (SELECT 1 FROM shopping_carts sc \
             WHERE sc.recipe_id = r.id AND sc.user_id = ",
        )
        .push_bind(user)
        .push(")");
    }
}

/// One page of recipes (newest first) plus the total matching count
pub async fn list<'a>(
    pool: &SqlitePool,
    q: &'a RecipeQuery<'a>,
) -> RepoResult<(Vec<Recipe>, i64)> {
    let mut count_qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM recipes r");
    push_filters(&mut count_qb, q);
    let count: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT r.* FROM recipes r");
    push_filters(&mut qb, q);
    qb.push(" ORDER BY r.id DESC LIMIT ")
        .push_bind(q.limit)
        .push(" OFFSET ")
        .push_bind(q.offset);
    let recipes = qb.build_query_as::<Recipe>().fetch_all(pool).await?;

    Ok((recipes, count))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(recipe)
}

/// Insert the full association sets for a recipe (one row per tag / per
/// ingredient amount). Runs inside the caller's transaction.
async fn insert_associations(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    data: &RecipeWrite,
) -> RepoResult<()> {
    for tag_id in &data.tags {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(*tag_id)
            .execute(&mut **tx)
            .await?;
    }
    for item in &data.ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES (?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(item.id)
        .bind(item.amount)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Create a recipe with its tag and ingredient sets, atomically
pub async fn create(
    pool: &SqlitePool,
    author_id: i64,
    data: &RecipeWrite,
    image: Option<&str>,
) -> RepoResult<Recipe> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        "INSERT INTO recipes (author_id, name, text, image, cooking_time) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(author_id)
    .bind(&data.name)
    .bind(&data.text)
    .bind(image)
    .bind(data.cooking_time)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    insert_associations(&mut tx, id, data).await?;
    tx.commit().await?;

    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(recipe)
}

/// Update a recipe, replacing both association sets wholesale.
///
/// `image` of `None` keeps the stored image. Clear-then-recreate is the
/// contract here: tags and ingredients absent from `data` are gone afterwards.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &RecipeWrite,
    image: Option<&str>,
) -> RepoResult<Recipe> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE recipes SET name = ?, text = ?, cooking_time = ?, \
         image = COALESCE(?, image) WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.text)
    .bind(data.cooking_time)
    .bind(image)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_associations(&mut tx, id, data).await?;
    tx.commit().await?;

    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(recipe)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Tags of one recipe, id order
pub async fn tags_for(pool: &SqlitePool, recipe_id: i64) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT t.* FROM tags t \
         JOIN recipe_tags rt ON rt.tag_id = t.id \
         WHERE rt.recipe_id = ? ORDER BY t.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(tags)
}

/// Ingredient lines of one recipe, as rendered in the read representation
pub async fn ingredients_for(pool: &SqlitePool, recipe_id: i64) -> RepoResult<Vec<IngredientAmount>> {
    let items = sqlx::query_as::<_, IngredientAmount>(
        "SELECT i.id, i.name, i.measurement_unit, ri.amount \
         FROM recipe_ingredients ri \
         JOIN ingredients i ON i.id = ri.ingredient_id \
         WHERE ri.recipe_id = ? ORDER BY i.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Compact recipes of one author, newest first, optionally truncated
pub async fn summaries_for_author(
    pool: &SqlitePool,
    author_id: i64,
    limit: Option<i64>,
) -> RepoResult<Vec<RecipeSummary>> {
    let summaries = sqlx::query_as::<_, RecipeSummary>(
        "SELECT id, name, image, cooking_time FROM recipes \
         WHERE author_id = ? ORDER BY id DESC LIMIT ?",
    )
    .bind(author_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;
    Ok(summaries)
}

pub async fn count_for_author(pool: &SqlitePool, author_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Number of ingredient join rows for a recipe (used by tests and integrity checks)
pub async fn ingredient_row_count(pool: &SqlitePool, recipe_id: i64) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM recipe_ingredients WHERE recipe_id = ?")
            .bind(recipe_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
