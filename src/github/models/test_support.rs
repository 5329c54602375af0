//! Builders for organization and repository fixtures.
//!
//! # Examples
//!
//! ```
//! use orgview::github::models::test_support::{organization, repository};
//!
//! let org = organization("facebook", 120);
//! let repo = repository(1, 50, 3, "2024-01-01T00:00:00Z");
//! assert_eq!(org.public_repos, 120);
//! assert_eq!(repo.stargazers_count, 50);
//! ```

use chrono::{DateTime, Utc};

use super::{Organization, Repository};

/// Organization with the given login and repository count.
#[must_use]
pub fn organization(login: &str, public_repos: u64) -> Organization {
    Organization {
        login: login.to_owned(),
        name: None,
        avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
        description: None,
        public_repos,
        html_url: format!("https://github.com/{login}"),
    }
}

/// Repository with the fields the sort comparators look at.
///
/// `updated_at` is RFC 3339; an unparsable value falls back to the epoch.
#[must_use]
pub fn repository(id: u64, stars: u64, forks: u64, updated_at: &str) -> Repository {
    let updated = DateTime::parse_from_rfc3339(updated_at)
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or_default();

    Repository {
        id,
        name: format!("repo-{id}"),
        full_name: format!("example/repo-{id}"),
        html_url: format!("https://github.com/example/repo-{id}"),
        description: None,
        stargazers_count: stars,
        forks_count: forks,
        updated_at: updated,
        language: None,
        topics: Vec::new(),
    }
}

/// Repository with a primary language and otherwise neutral fields.
#[must_use]
pub fn repository_in(id: u64, language: &str) -> Repository {
    Repository {
        language: Some(language.to_owned()),
        ..repository(id, 0, 0, "2024-01-01T00:00:00Z")
    }
}

/// `count` consecutive repositories starting at `first_id`.
///
/// Star counts ascend with the id so a stars sort reverses the order.
#[must_use]
pub fn repository_batch(first_id: u64, count: u64) -> Vec<Repository> {
    (first_id..first_id.saturating_add(count))
        .map(|id| repository(id, id.saturating_mul(10), id, "2024-01-01T00:00:00Z"))
        .collect()
}
