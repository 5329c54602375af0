//! Error types exposed by the organization query layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// User-facing classification of a failed request.
///
/// Every [`QueryError`] falls into exactly one category. Only `NotFound` and
/// `RateLimited` get dedicated treatment; everything else is `Transient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The organization does not exist. Terminal until the input changes.
    NotFound,
    /// The API quota is exhausted. Recoverable by supplying a token.
    RateLimited,
    /// Any other failure. Surfaced without automatic retry.
    Transient,
}

/// Errors surfaced while validating input or talking to GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// No organization name was supplied.
    #[error("organization name is required")]
    MissingOrganization,

    /// The organization name cannot be a GitHub login.
    #[error("organization name is invalid: {value}")]
    InvalidOrganization {
        /// The rejected input.
        value: String,
    },

    /// GitHub answered 404 for the organization.
    #[error("organization `{organization}` was not found")]
    NotFound {
        /// Organization name as queried.
        organization: String,
    },

    /// GitHub answered 403 or 429.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimited {
        /// Window details, when the response carried them.
        rate_limit: Option<RateLimitInfo>,
        /// Message returned by GitHub.
        message: String,
    },

    /// Any other HTTP, transport or decoding failure.
    #[error("GitHub request failed: {message}")]
    Transient {
        /// Failure detail.
        message: String,
    },

    /// Pagination parameters are out of range.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Which parameter was rejected.
        message: String,
    },

    /// A blank personal access token was supplied.
    #[error("personal access token must not be blank")]
    MissingToken,

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying operation.
        message: String,
    },

    /// Stored preferences could not be read or written.
    #[error("preference storage error: {message}")]
    Persistence {
        /// Error detail from the storage layer.
        message: String,
    },
}

impl QueryError {
    /// Classifies the error for presentation.
    ///
    /// A name that cannot be a GitHub login never resolves, so it reads the
    /// same as a 404.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::InvalidOrganization { .. } => ErrorCategory::NotFound,
            Self::RateLimited { .. } => ErrorCategory::RateLimited,
            _ => ErrorCategory::Transient,
        }
    }
}

/// Returns true when the error is a rate limit rejection.
#[must_use]
pub const fn is_rate_limited(error: &QueryError) -> bool {
    matches!(error.category(), ErrorCategory::RateLimited)
}

/// Returns true when the error reports a missing organization.
#[must_use]
pub const fn is_not_found(error: &QueryError) -> bool {
    matches!(error.category(), ErrorCategory::NotFound)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ErrorCategory, QueryError, is_not_found, is_rate_limited};
    use crate::github::rate_limit::RateLimitInfo;

    #[rstest]
    #[case::not_found(
        QueryError::NotFound { organization: "ghost".to_owned() },
        ErrorCategory::NotFound
    )]
    #[case::rate_limited(
        QueryError::RateLimited {
            rate_limit: Some(RateLimitInfo::new(60, 0, 0)),
            message: "API rate limit exceeded".to_owned(),
        },
        ErrorCategory::RateLimited
    )]
    #[case::transient(
        QueryError::Transient { message: "502".to_owned() },
        ErrorCategory::Transient
    )]
    #[case::invalid_input(
        QueryError::InvalidOrganization { value: "-bad".to_owned() },
        ErrorCategory::NotFound
    )]
    #[case::storage(
        QueryError::Persistence { message: "locked".to_owned() },
        ErrorCategory::Transient
    )]
    fn category_covers_every_variant(#[case] error: QueryError, #[case] expected: ErrorCategory) {
        assert_eq!(error.category(), expected);
        assert_eq!(is_rate_limited(&error), expected == ErrorCategory::RateLimited);
        assert_eq!(is_not_found(&error), expected == ErrorCategory::NotFound);
    }

    #[test]
    fn rate_limited_message_mentions_the_quota() {
        let error = QueryError::RateLimited {
            rate_limit: None,
            message: "API rate limit exceeded for 203.0.113.7".to_owned(),
        };

        assert_eq!(
            error.to_string(),
            "GitHub API rate limit exceeded: API rate limit exceeded for 203.0.113.7"
        );
    }
}
