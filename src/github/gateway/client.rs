//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::github::error::QueryError;
use crate::github::locator::ApiBase;

/// Builds an anonymous Octocrab client rooted at `api_base`.
///
/// Credentials are attached per request, so the client itself never carries
/// a token. Octocrab's retry layer is disabled: every failure surfaces after
/// a single request.
///
/// # Errors
///
/// Returns [`QueryError::Configuration`] when the base URI is rejected or
/// Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(api_base: &ApiBase) -> Result<Octocrab, QueryError> {
    let base_uri: Uri = api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| QueryError::Configuration {
            message: format!("invalid API base: {error}"),
        })?;

    Octocrab::builder()
        .add_retry_config(RetryConfig::None)
        .base_uri(base_uri)
        .map_err(|error| QueryError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| QueryError::Configuration {
            message: format!("build client failed: {error}"),
        })
}
