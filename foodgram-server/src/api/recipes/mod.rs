//! Recipe API module
//!
//! Listing, writes, favorite/cart toggles and the shopping-list export.

mod handler;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;
use crate::utils::qs;
use crate::utils::{AppError, PageQuery};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/recipes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/download_shopping_cart", get(handler::download_shopping_cart))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/favorite",
            post(handler::add_favorite).delete(handler::remove_favorite),
        )
        .route(
            "/{id}/shopping_cart",
            post(handler::add_to_cart).delete(handler::remove_from_cart),
        )
}

/// Recipe listing query. Parsed from the raw query string because `tags`
/// repeats (`?tags=lunch&tags=dinner`), which the plain form deserializer
/// cannot express.
#[derive(Debug, Default)]
pub struct RecipeListQuery {
    pub page: PageQuery,
    pub author: Option<i64>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeListQuery {
    fn parse(raw: &str) -> Result<Self, AppError> {
        let mut query = Self::default();
        for (key, value) in qs::parse_pairs(raw) {
            match key.as_str() {
                "page" => {
                    query.page.page = Some(
                        value
                            .parse()
                            .map_err(|_| AppError::validation("page", "Invalid page number"))?,
                    )
                }
                "limit" => {
                    query.page.limit = Some(
                        value
                            .parse()
                            .map_err(|_| AppError::validation("limit", "Invalid page size"))?,
                    )
                }
                "author" => {
                    query.author = Some(
                        value
                            .parse()
                            .map_err(|_| AppError::validation("author", "Invalid author id"))?,
                    )
                }
                "tags" => query.tags.push(value),
                "is_favorited" => query.is_favorited = qs::parse_flag(&value),
                "is_in_shopping_cart" => query.is_in_shopping_cart = qs::parse_flag(&value),
                // Unknown parameters are ignored, like any form backend would
                _ => {}
            }
        }
        Ok(query)
    }

    /// Non-pagination parameters, re-serialized for the page links
    pub fn extra_query(&self) -> String {
        let mut parts: Vec<String> = self.tags.iter().map(|t| format!("tags={t}")).collect();
        if let Some(author) = self.author {
            parts.push(format!("author={author}"));
        }
        if self.is_favorited {
            parts.push("is_favorited=1".to_string());
        }
        if self.is_in_shopping_cart {
            parts.push("is_in_shopping_cart=1".to_string());
        }
        parts.join("&")
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RecipeListQuery {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::parse(parts.uri.query().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_tags_collected() {
        let q = RecipeListQuery::parse("tags=lunch&tags=dinner&author=7&is_favorited=1").unwrap();
        assert_eq!(q.tags, vec!["lunch", "dinner"]);
        assert_eq!(q.author, Some(7));
        assert!(q.is_favorited);
        assert!(!q.is_in_shopping_cart);
    }

    #[test]
    fn bad_author_rejected() {
        assert!(RecipeListQuery::parse("author=bob").is_err());
    }

    #[test]
    fn extra_query_round_trip() {
        let q = RecipeListQuery::parse("tags=lunch&is_in_shopping_cart=true&page=2").unwrap();
        assert_eq!(q.extra_query(), "tags=lunch&is_in_shopping_cart=1");
        assert_eq!(q.page.page, Some(2));
    }
}
