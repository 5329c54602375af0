//! Gateway for loading organizations and their repositories through Octocrab.
//!
//! The [`OrganizationGateway`] trait is the seam between the fetch
//! coordination logic and the network. Tests substitute scripted gateways;
//! [`OctocrabOrganizationGateway`] performs the real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod organization;

pub use organization::OctocrabOrganizationGateway;

use async_trait::async_trait;

use crate::github::error::QueryError;
use crate::github::locator::PersonalAccessToken;
use crate::github::models::Organization;
use crate::github::pagination::{ListRepositoriesParams, RepositoryPage};

/// Gateway that can resolve organizations and list their repositories.
///
/// The credential is supplied per call so a newly entered token takes effect
/// on the next request without rebuilding the client.
#[async_trait]
pub trait OrganizationGateway: Send + Sync {
    /// Fetch the organization profile.
    async fn resolve_organization(
        &self,
        organization: &str,
        credential: Option<&PersonalAccessToken>,
    ) -> Result<Organization, QueryError>;

    /// Fetch one page of the organization's repositories.
    ///
    /// A blank organization name yields an empty page without a request.
    async fn list_repositories(
        &self,
        organization: &str,
        params: &ListRepositoriesParams,
        credential: Option<&PersonalAccessToken>,
    ) -> Result<RepositoryPage, QueryError>;
}
