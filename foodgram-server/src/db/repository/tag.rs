//! Tag Repository

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepoResult;
use crate::db::models::Tag;

/// All tags, stable id order
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(tags)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(tag)
}

/// Fetch the subset of `ids` that exist, id order
pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Tag>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM tags WHERE id IN (");
    let mut sep = qb.separated(", ");
    for id in ids {
        sep.push_bind(*id);
    }
    qb.push(") ORDER BY id");
    let tags = qb.build_query_as::<Tag>().fetch_all(pool).await?;
    Ok(tags)
}

/// Insert a tag (reference data seeding; uniqueness enforced by constraint)
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    color: &str,
    slug: &str,
) -> RepoResult<Tag> {
    let id = sqlx::query("INSERT INTO tags (name, color, slug) VALUES (?, ?, ?)")
        .bind(name)
        .bind(color)
        .bind(slug)
        .execute(pool)
        .await?
        .last_insert_rowid();
    Ok(Tag {
        id,
        name: name.to_string(),
        color: color.to_string(),
        slug: slug.to_string(),
    })
}
