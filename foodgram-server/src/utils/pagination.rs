//! Page-number pagination
//!
//! DRF-shaped envelope: `{count, next, previous, results}` with 1-based `page`
//! and a `limit` page-size override.

use serde::{Deserialize, Serialize};

/// Query parameters shared by every paginated listing
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Resolved page number (1-based)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Resolved page size
    pub fn limit(&self, default_limit: u32) -> u32 {
        self.limit.unwrap_or(default_limit).max(1)
    }

    /// SQL offset for the resolved page. Widened to i64 before multiplying;
    /// `page` is client-controlled and may be u32::MAX.
    pub fn offset(&self, default_limit: u32) -> i64 {
        (i64::from(self.page()) - 1) * i64::from(self.limit(default_limit))
    }
}

/// One page of results
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page envelope with relative next/previous links.
    ///
    /// `extra_query` carries any non-pagination query parameters that must be
    /// preserved in the links (already URL-encoded, e.g. `"tags=lunch&author=3"`).
    pub fn new(
        path: &str,
        query: &PageQuery,
        default_limit: u32,
        extra_query: &str,
        count: i64,
        results: Vec<T>,
    ) -> Self {
        let page = query.page();
        let limit = query.limit(default_limit);
        let pages = if count == 0 {
            1
        } else {
            ((count as u64).div_ceil(u64::from(limit))) as u32
        };

        let link = |p: u32| {
            if extra_query.is_empty() {
                format!("{path}?page={p}&limit={limit}")
            } else {
                format!("{path}?{extra_query}&page={p}&limit={limit}")
            }
        };

        Self {
            count,
            next: (page < pages).then(|| link(page + 1)),
            previous: (page > 1).then(|| link(page - 1)),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<u32>, limit: Option<u32>) -> PageQuery {
        PageQuery { page, limit }
    }

    #[test]
    fn first_page_has_no_previous() {
        let page = Page::new("/api/recipes/", &query(None, None), 6, "", 13, vec![1, 2]);
        assert_eq!(page.previous, None);
        assert_eq!(page.next.as_deref(), Some("/api/recipes/?page=2&limit=6"));
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::new("/api/recipes/", &query(Some(3), None), 6, "", 13, vec![1]);
        assert_eq!(page.next, None);
        assert_eq!(page.previous.as_deref(), Some("/api/recipes/?page=2&limit=6"));
    }

    #[test]
    fn filter_params_survive_in_links() {
        let page = Page::new(
            "/api/recipes/",
            &query(Some(2), Some(2)),
            6,
            "tags=lunch",
            6,
            vec![1, 2],
        );
        assert_eq!(
            page.next.as_deref(),
            Some("/api/recipes/?tags=lunch&page=3&limit=2")
        );
    }

    #[test]
    fn empty_result_is_a_single_page() {
        let page = Page::new("/api/users/", &query(None, None), 6, "", 0, Vec::<i32>::new());
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
        assert_eq!(page.count, 0);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        assert_eq!(query(Some(3), Some(10)).offset(6), 20);
        assert_eq!(query(None, None).offset(6), 0);
    }

    #[test]
    fn offset_handles_extreme_page_numbers() {
        let q = query(Some(u32::MAX), Some(6));
        assert_eq!(q.offset(6), (i64::from(u32::MAX) - 1) * 6);
        assert_eq!(query(Some(u32::MAX), Some(u32::MAX)).offset(6), (i64::from(u32::MAX) - 1) * i64::from(u32::MAX));
    }
}
