//! Subscription Repository

use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::User;

/// Insert a follows-relationship; duplicates surface as `Duplicate`.
/// The self-subscription CHECK constraint backs up the handler-level rule.
pub async fn add(pool: &SqlitePool, user_id: i64, author_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO subscriptions (user_id, author_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => {
                RepoError::Duplicate("Already subscribed to this author".to_string())
            }
            other => other,
        })?;
    Ok(())
}

/// Delete the follows-relationship; `false` when no row existed
pub async fn remove(pool: &SqlitePool, user_id: i64, author_id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE user_id = ? AND author_id = ?")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn exists(pool: &SqlitePool, user_id: i64, author_id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM subscriptions WHERE user_id = ? AND author_id = ?",
    )
    .bind(user_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// One page of authors the user follows (subscription order) plus total count
pub async fn authors(
    pool: &SqlitePool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<(Vec<User>, i64)> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    let users = sqlx::query_as::<_, User>(
        "SELECT u.* FROM users u \
         JOIN subscriptions s ON s.author_id = u.id \
         WHERE s.user_id = ? ORDER BY s.id LIMIT ? OFFSET ?",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok((users, count))
}

/// Of `author_ids`, the subset the user follows (for is_subscribed flags)
pub async fn subscribed_ids(
    pool: &SqlitePool,
    user_id: i64,
    author_ids: &[i64],
) -> RepoResult<HashSet<i64>> {
    if author_ids.is_empty() {
        return Ok(HashSet::new());
    }
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT author_id FROM subscriptions WHERE user_id = ");
    qb.push_bind(user_id).push(" AND author_id IN (");
    let mut sep = qb.separated(", ");
    for id in author_ids {
        sep.push_bind(*id);
    }
    qb.push(")");
    let ids: Vec<i64> = qb.build_query_scalar().fetch_all(pool).await?;
    Ok(ids.into_iter().collect())
}
