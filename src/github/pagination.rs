//! Page requests and page results for repository listings.
//!
//! GitHub's list endpoints are page-numbered. `orgview` asks for fixed-size
//! pages and treats a page shorter than requested as the end of the listing,
//! so no `Link` header parsing is needed.

use super::error::QueryError;
use super::models::Repository;

/// Repositories requested per page.
pub const PAGE_SIZE: u8 = 10;

/// Largest `per_page` value the GitHub API accepts.
pub const MAX_PER_PAGE: u8 = 100;

/// Parameters for one `GET /orgs/{org}/repos` call.
///
/// # Example
///
/// ```
/// use orgview::github::pagination::{ListRepositoriesParams, PAGE_SIZE};
///
/// let params = ListRepositoriesParams::for_page(3);
/// assert_eq!(params.page, 3);
/// assert_eq!(params.per_page, PAGE_SIZE);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRepositoriesParams {
    /// 1-based page number.
    pub page: u32,
    /// Items per page, 1 to 100.
    pub per_page: u8,
}

impl ListRepositoriesParams {
    /// Parameters for `page` with the default page size.
    #[must_use]
    pub const fn for_page(page: u32) -> Self {
        Self {
            page,
            per_page: PAGE_SIZE,
        }
    }

    /// Overrides the page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page;
        self
    }

    /// Checks the parameters against the API's accepted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPagination`] when `page` is zero or
    /// `per_page` is outside 1 to 100.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page == 0 {
            return Err(QueryError::InvalidPagination {
                message: "page must be at least 1".to_owned(),
            });
        }

        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(QueryError::InvalidPagination {
                message: format!("per_page must be between 1 and {MAX_PER_PAGE}"),
            });
        }

        Ok(())
    }

    /// Query string for the request, newest updates first.
    pub(crate) fn query_string(&self) -> String {
        format!(
            "per_page={per_page}&page={page}&sort=updated&direction=desc",
            per_page = self.per_page,
            page = self.page
        )
    }
}

impl Default for ListRepositoriesParams {
    fn default() -> Self {
        Self::for_page(1)
    }
}

/// One page of repositories, in the order the API returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPage {
    items: Vec<Repository>,
    page: u32,
    per_page: u8,
}

impl RepositoryPage {
    /// Wraps the items of page `page`.
    #[must_use]
    pub const fn new(items: Vec<Repository>, page: u32, per_page: u8) -> Self {
        Self {
            items,
            page,
            per_page,
        }
    }

    /// Empty page, as returned for a blank organization name.
    #[must_use]
    pub const fn empty(params: &ListRepositoriesParams) -> Self {
        Self::new(Vec::new(), params.page, params.per_page)
    }

    /// Repositories on the page.
    #[must_use]
    pub fn items(&self) -> &[Repository] {
        &self.items
    }

    /// Consumes the page and returns its repositories.
    #[must_use]
    pub fn into_items(self) -> Vec<Repository> {
        self.items
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size that was requested.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Number of repositories on the page.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the page holds no repositories.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true when the page is shorter than requested.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        self.items.len() < self.per_page as usize
    }
}
