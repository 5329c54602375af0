//! Identity wrappers for organization queries.

use std::fmt;

use url::Url;

use super::error::QueryError;

/// Public GitHub API endpoint.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Longest login GitHub accepts.
const MAX_LOGIN_LENGTH: usize = 39;

/// Validated GitHub organization login.
///
/// GitHub logins are ASCII alphanumerics and hyphens, at most 39 characters,
/// and neither start nor end with a hyphen. Comparison on the API side is
/// case-insensitive, so [`OrganizationName::cache_key`] lower-cases.
///
/// # Example
///
/// ```
/// use orgview::github::OrganizationName;
///
/// let name = OrganizationName::parse("  Facebook ").expect("valid login");
/// assert_eq!(name.as_str(), "Facebook");
/// assert_eq!(name.cache_key(), "facebook");
/// assert!(OrganizationName::parse("-facebook").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationName(String);

impl OrganizationName {
    /// Trims and validates a login.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingOrganization`] for blank input and
    /// [`QueryError::InvalidOrganization`] when the input is not a valid login.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::MissingOrganization);
        }

        let well_formed = trimmed.len() <= MAX_LOGIN_LENGTH
            && trimmed
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || character == '-')
            && !trimmed.starts_with('-')
            && !trimmed.ends_with('-');

        if !well_formed {
            return Err(QueryError::InvalidOrganization {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the login as typed.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lower-cased login used to key cached sessions.
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    pub(crate) fn organization_path(&self) -> String {
        format!("/orgs/{}", self.0)
    }

    pub(crate) fn repositories_path(&self) -> String {
        format!("/orgs/{}/repos", self.0)
    }
}

impl fmt::Display for OrganizationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Personal access token forwarded as a bearer credential.
///
/// The value is opaque. `Debug` output never includes it.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Trims the token and rejects blank input.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, QueryError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QueryError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }

    /// Value of the `Authorization` header for this token.
    #[must_use]
    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PersonalAccessToken")
            .field(&"<redacted>")
            .finish()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Base URL of the REST API, for github.com or a GitHub Enterprise host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parses an absolute HTTP(S) URL.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Configuration`] when the URL cannot be parsed or
    /// does not use HTTP(S).
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let url = Url::parse(input.trim()).map_err(|error| QueryError::Configuration {
            message: format!("invalid API base `{input}`: {error}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(QueryError::Configuration {
                message: format!("API base must use http or https: {input}"),
            });
        }

        Ok(Self(url))
    }

    /// The base URL without a trailing slash, ready for path joining.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }
}
