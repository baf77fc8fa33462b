//! Ingredient Repository

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepoResult;
use crate::db::models::Ingredient;

/// List ingredients, optionally restricted to a case-insensitive name prefix
pub async fn search(pool: &SqlitePool, name: Option<&str>) -> RepoResult<Vec<Ingredient>> {
    let ingredients = match name {
        Some(prefix) if !prefix.is_empty() => {
            // Escape the escape character first, then the LIKE metacharacters
            let escaped = prefix
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            sqlx::query_as::<_, Ingredient>(
                "SELECT * FROM ingredients WHERE name LIKE ? ESCAPE '\\' ORDER BY name",
            )
            .bind(format!("{escaped}%"))
            .fetch_all(pool)
            .await?
        }
        _ => {
            sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients ORDER BY name")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(ingredients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Ingredient>> {
    let ingredient = sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(ingredient)
}

/// Fetch the subset of `ids` that exist, id order
pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Ingredient>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM ingredients WHERE id IN (");
    let mut sep = qb.separated(", ");
    for id in ids {
        sep.push_bind(*id);
    }
    qb.push(") ORDER BY id");
    let ingredients = qb.build_query_as::<Ingredient>().fetch_all(pool).await?;
    Ok(ingredients)
}

/// Insert an ingredient (reference data seeding)
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    measurement_unit: &str,
) -> RepoResult<Ingredient> {
    let id = sqlx::query("INSERT INTO ingredients (name, measurement_unit) VALUES (?, ?)")
        .bind(name)
        .bind(measurement_unit)
        .execute(pool)
        .await?
        .last_insert_rowid();
    Ok(Ingredient {
        id,
        name: name.to_string(),
        measurement_unit: measurement_unit.to_string(),
    })
}
