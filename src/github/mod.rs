//! GitHub organization and repository access.
//!
//! This module wraps Octocrab to resolve an organization profile and page
//! through its public repositories. Failures are classified into the
//! `NotFound`, `RateLimited` and `Transient` categories so callers can
//! present them without inspecting HTTP details.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use error::{ErrorCategory, QueryError, is_not_found, is_rate_limited};
pub use gateway::{OctocrabOrganizationGateway, OrganizationGateway};
pub use locator::{ApiBase, GITHUB_API_BASE, OrganizationName, PersonalAccessToken};
pub use models::{Organization, Repository};
pub use pagination::{ListRepositoriesParams, PAGE_SIZE, RepositoryPage};
pub use rate_limit::RateLimitInfo;
