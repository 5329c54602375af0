//! Maps GitHub responses onto the query error taxonomy.
//!
//! 404 is `NotFound`, 403 and 429 are `RateLimited`, and every other failure
//! is `Transient`.

use http::StatusCode;

use crate::github::error::QueryError;
use crate::github::locator::OrganizationName;
use crate::github::rate_limit::RateLimitInfo;

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

const fn is_rate_limit_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    )
}

pub(super) fn map_status(
    operation: &str,
    organization: &OrganizationName,
    status: StatusCode,
    maybe_message: Option<String>,
    rate_limit: Option<RateLimitInfo>,
) -> QueryError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());

    if status == StatusCode::NOT_FOUND {
        return QueryError::NotFound {
            organization: organization.as_str().to_owned(),
        };
    }

    if is_rate_limit_status(status) {
        return QueryError::RateLimited {
            rate_limit,
            message: rate_limit.map_or_else(
                || message.clone(),
                |info| format!("{message} (resets in {}s)", info.seconds_until_reset()),
            ),
        };
    }

    QueryError::Transient {
        message: format!("{operation} failed with status {status}: {message}"),
    }
}

pub(super) fn map_octocrab_error(
    operation: &str,
    organization: &OrganizationName,
    error: &octocrab::Error,
) -> QueryError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_status(
            operation,
            organization,
            source.status_code,
            Some(source.message.clone()),
            None,
        );
    }

    if is_network_error(error) {
        return QueryError::Transient {
            message: format!("{operation} failed: network error: {error}"),
        };
    }

    QueryError::Transient {
        message: format!("{operation} failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::map_status;
    use crate::github::error::{ErrorCategory, QueryError};
    use crate::github::locator::OrganizationName;
    use crate::github::rate_limit::RateLimitInfo;

    fn facebook() -> OrganizationName {
        OrganizationName::parse("facebook").expect("valid login")
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, ErrorCategory::NotFound)]
    #[case::forbidden(StatusCode::FORBIDDEN, ErrorCategory::RateLimited)]
    #[case::too_many(StatusCode::TOO_MANY_REQUESTS, ErrorCategory::RateLimited)]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, ErrorCategory::Transient)]
    #[case::server_error(StatusCode::BAD_GATEWAY, ErrorCategory::Transient)]
    fn status_codes_map_onto_categories(
        #[case] status: StatusCode,
        #[case] expected: ErrorCategory,
    ) {
        let error = map_status("resolve organization", &facebook(), status, None, None);
        assert_eq!(error.category(), expected);
    }

    #[test]
    fn rate_limit_keeps_the_window_details() {
        let info = RateLimitInfo::new(60, 0, 0);

        let error = map_status(
            "list repositories",
            &facebook(),
            StatusCode::FORBIDDEN,
            Some("API rate limit exceeded".to_owned()),
            Some(info),
        );

        assert_eq!(
            error,
            QueryError::RateLimited {
                rate_limit: Some(info),
                message: "API rate limit exceeded (resets in 0s)".to_owned(),
            }
        );
    }

    #[test]
    fn transient_errors_name_the_operation_and_status() {
        let error = map_status(
            "list repositories",
            &facebook(),
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("boom".to_owned()),
            None,
        );

        assert_eq!(
            error.to_string(),
            "GitHub request failed: list repositories failed with status 500 Internal Server Error: boom"
        );
    }
}
