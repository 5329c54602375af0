//! Organization and repository records returned by the GitHub API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Organization profile from `GET /orgs/{org}`.
///
/// Replaced wholesale whenever the query changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Unique, case-insensitive handle.
    pub login: String,
    /// Display name, when the organization set one.
    pub name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Profile description.
    pub description: Option<String>,
    /// Number of public repositories.
    pub public_repos: u64,
    /// Profile page on github.com.
    pub html_url: String,
}

impl Organization {
    /// Display name, falling back to the login.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// Repository entry from `GET /orgs/{org}/repos`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Numeric identifier, stable across pages.
    pub id: u64,
    /// Short name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Repository page on github.com.
    pub html_url: String,
    /// Repository description.
    pub description: Option<String>,
    /// Star count.
    pub stargazers_count: u64,
    /// Fork count.
    pub forks_count: u64,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Primary language detected by GitHub.
    pub language: Option<String>,
    /// Repository topics; empty when the API omits them.
    pub topics: Vec<String>,
}

/// Shown in place of a missing or blank repository description.
pub const NO_DESCRIPTION: &str = "No description available.";

impl Repository {
    /// Description text, or [`NO_DESCRIPTION`] when there is none.
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Topics joined with commas; `None` when the repository has none.
    #[must_use]
    pub fn topic_list(&self) -> Option<String> {
        (!self.topics.is_empty()).then(|| self.topics.join(", "))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiOrganization {
    pub(super) login: String,
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) avatar_url: String,
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) public_repos: u64,
    #[serde(default)]
    pub(super) html_url: String,
}

impl From<ApiOrganization> for Organization {
    fn from(value: ApiOrganization) -> Self {
        Self {
            login: value.login,
            name: value.name,
            avatar_url: value.avatar_url,
            description: value.description,
            public_repos: value.public_repos,
            html_url: value.html_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) id: u64,
    pub(super) name: String,
    #[serde(default)]
    pub(super) full_name: String,
    #[serde(default)]
    pub(super) html_url: String,
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) stargazers_count: u64,
    #[serde(default)]
    pub(super) forks_count: u64,
    pub(super) updated_at: DateTime<Utc>,
    pub(super) language: Option<String>,
    #[serde(default)]
    pub(super) topics: Option<Vec<String>>,
}

impl From<ApiRepository> for Repository {
    fn from(value: ApiRepository) -> Self {
        Self {
            id: value.id,
            name: value.name,
            full_name: value.full_name,
            html_url: value.html_url,
            description: value.description,
            stargazers_count: value.stargazers_count,
            forks_count: value.forks_count,
            updated_at: value.updated_at,
            language: value.language,
            topics: value.topics.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ApiOrganization, ApiRepository, NO_DESCRIPTION, Organization, Repository};
    use crate::github::models::test_support::repository;

    #[test]
    fn repository_decodes_without_topics() {
        let json = r#"{
            "id": 7,
            "name": "react",
            "full_name": "facebook/react",
            "html_url": "https://github.com/facebook/react",
            "description": null,
            "stargazers_count": 200000,
            "forks_count": 40000,
            "updated_at": "2024-05-01T12:00:00Z",
            "language": "JavaScript"
        }"#;

        let api: ApiRepository = serde_json::from_str(json).expect("repository JSON should decode");
        let repository = Repository::from(api);

        assert_eq!(repository.id, 7);
        assert_eq!(repository.full_name, "facebook/react");
        assert!(repository.topics.is_empty());
        assert_eq!(repository.updated_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[rstest]
    #[case::named(Some("Meta"), "Meta")]
    #[case::unnamed(None, "facebook")]
    #[case::blank(Some("  "), "facebook")]
    fn display_name_falls_back_to_login(#[case] name: Option<&str>, #[case] expected: &str) {
        let api = ApiOrganization {
            login: "facebook".to_owned(),
            name: name.map(ToOwned::to_owned),
            avatar_url: String::new(),
            description: None,
            public_repos: 120,
            html_url: String::new(),
        };

        assert_eq!(Organization::from(api).display_name(), expected);
    }

    #[rstest]
    #[case::present(Some("A UI library"), "A UI library")]
    #[case::missing(None, NO_DESCRIPTION)]
    #[case::blank(Some("   "), NO_DESCRIPTION)]
    fn description_falls_back_when_absent(
        #[case] description: Option<&str>,
        #[case] expected: &str,
    ) {
        let repo = Repository {
            description: description.map(ToOwned::to_owned),
            ..repository(1, 0, 0, "2024-01-01T00:00:00Z")
        };

        assert_eq!(repo.description_or_default(), expected);
    }

    #[test]
    fn topics_are_joined_for_display() {
        let bare = repository(1, 0, 0, "2024-01-01T00:00:00Z");
        let tagged = Repository {
            topics: vec!["ui".to_owned(), "javascript".to_owned()],
            ..bare.clone()
        };

        assert_eq!(bare.topic_list(), None);
        assert_eq!(tagged.topic_list().as_deref(), Some("ui, javascript"));
    }
}
