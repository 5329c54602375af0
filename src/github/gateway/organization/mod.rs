//! Octocrab-backed organization gateway.

use async_trait::async_trait;
use http::Uri;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;

use crate::github::error::QueryError;
use crate::github::locator::{ApiBase, OrganizationName, PersonalAccessToken};
use crate::github::models::{ApiOrganization, ApiRepository, Organization};
use crate::github::pagination::{ListRepositoriesParams, RepositoryPage};
use crate::github::rate_limit::RateLimitInfo;

use super::OrganizationGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{map_octocrab_error, map_status};
use super::http_utils::{credential_headers, extract_github_message};

const RESOLVE_OPERATION: &str = "resolve organization";
const LIST_OPERATION: &str = "list repositories";

/// Gateway that talks to the GitHub REST API through Octocrab.
#[derive(Clone)]
pub struct OctocrabOrganizationGateway {
    client: Octocrab,
}

impl OctocrabOrganizationGateway {
    /// Wraps an existing Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Creates a gateway rooted at `api_base`.
    ///
    /// Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Configuration`] when the client cannot be built.
    pub fn for_api_base(api_base: &ApiBase) -> Result<Self, QueryError> {
        Ok(Self::new(build_octocrab_client(api_base)?))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        organization: &OrganizationName,
        path_and_query: String,
        credential: Option<&PersonalAccessToken>,
    ) -> Result<T, QueryError> {
        let uri: Uri = path_and_query
            .parse::<Uri>()
            .map_err(|error| QueryError::InvalidOrganization {
                value: format!("{organization}: {error}"),
            })?;
        let headers = credential_headers(credential)?;

        let response = self
            .client
            ._get_with_headers(uri, headers)
            .await
            .map_err(|error| map_octocrab_error(operation, organization, &error))?;

        let status = response.status();
        if !status.is_success() {
            let rate_limit = RateLimitInfo::from_headers(response.headers());
            let body = self
                .client
                .body_to_string(response)
                .await
                .unwrap_or_else(|_| String::new());
            return Err(map_status(
                operation,
                organization,
                status,
                extract_github_message(&body),
                rate_limit,
            ));
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| QueryError::Transient {
                message: format!("{operation} response decode failed: {error}"),
            })?;

        serde_json::from_str(&body).map_err(|error| QueryError::Transient {
            message: format!("{operation} response deserialisation failed: {error}"),
        })
    }
}

#[async_trait]
impl OrganizationGateway for OctocrabOrganizationGateway {
    async fn resolve_organization(
        &self,
        organization: &str,
        credential: Option<&PersonalAccessToken>,
    ) -> Result<Organization, QueryError> {
        let name = OrganizationName::parse(organization)?;
        tracing::debug!(organization = %name, "resolving organization");

        let api: ApiOrganization = self
            .get_json(
                RESOLVE_OPERATION,
                &name,
                name.organization_path(),
                credential,
            )
            .await?;
        Ok(api.into())
    }

    async fn list_repositories(
        &self,
        organization: &str,
        params: &ListRepositoriesParams,
        credential: Option<&PersonalAccessToken>,
    ) -> Result<RepositoryPage, QueryError> {
        if organization.trim().is_empty() {
            return Ok(RepositoryPage::empty(params));
        }
        params.validate()?;
        let name = OrganizationName::parse(organization)?;
        tracing::debug!(organization = %name, page = params.page, "listing repositories");

        let path_and_query = format!(
            "{path}?{query}",
            path = name.repositories_path(),
            query = params.query_string()
        );
        let items: Vec<ApiRepository> = self
            .get_json(LIST_OPERATION, &name, path_and_query, credential)
            .await?;

        Ok(RepositoryPage::new(
            items.into_iter().map(Into::into).collect(),
            params.page,
            params.per_page,
        ))
    }
}
