//! Shared HTTP helpers for the Octocrab gateway.

use http::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::github::error::QueryError;
use crate::github::locator::PersonalAccessToken;

/// Headers carrying the bearer credential, if one is supplied.
pub(super) fn credential_headers(
    credential: Option<&PersonalAccessToken>,
) -> Result<Option<HeaderMap>, QueryError> {
    let Some(token) = credential else {
        return Ok(None);
    };

    let mut value =
        HeaderValue::from_str(&token.bearer_value()).map_err(|_| QueryError::Configuration {
            message: "personal access token contains characters not allowed in a header"
                .to_owned(),
        })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(Some(headers))
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
