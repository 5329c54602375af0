//! One-shot organization listing.

use std::io::{self, Write};

use orgview::github::{ApiBase, OctocrabOrganizationGateway, OrganizationGateway};
use orgview::{
    FetchCoordinator, OrgviewConfig, PreferenceStore, QueryDriver, QueryError, SortMode,
};

use super::output::write_listing;

/// Prints the configured or stored organization.
///
/// # Errors
///
/// Returns [`QueryError::MissingOrganization`] when no organization is known
/// and any error that stopped the query. Pages loaded before a late failure
/// are still printed.
pub async fn run(
    config: &OrgviewConfig,
    preferences: &mut PreferenceStore,
) -> Result<(), QueryError> {
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(
        config,
        preferences,
        OctocrabOrganizationGateway::for_api_base,
        &mut stdout,
    )
    .await
}

/// Prints the listing using a custom gateway builder.
///
/// This function is exposed for testing with mock gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &OrgviewConfig,
    preferences: &mut PreferenceStore,
    build_gateway: F,
    writer: &mut W,
) -> Result<(), QueryError>
where
    G: OrganizationGateway,
    F: FnOnce(&ApiBase) -> Result<G, QueryError>,
    W: Write,
{
    let organization = config
        .organization()
        .map(str::to_owned)
        .or_else(|| {
            Some(preferences.organization().trim().to_owned()).filter(|name| !name.is_empty())
        })
        .ok_or(QueryError::MissingOrganization)?;
    let sort_mode = config
        .sort_mode()?
        .unwrap_or_else(|| preferences.sort_mode());
    let credential = match config.resolve_token()? {
        Some(token) => Some(token),
        None => preferences.credential().cloned(),
    };
    let gateway = build_gateway(&config.api_base()?)?;

    remember(preferences, &organization, sort_mode);

    let coordinator = FetchCoordinator::new(config.cache_ttl());
    let mut driver = QueryDriver::new(&gateway, coordinator).with_credential(credential);
    driver.query(&organization).await;
    driver.load_pages(config.page_limit()).await;

    let failure = driver.coordinator().error().cloned();
    if driver.coordinator().organization().is_none() {
        return Err(failure.unwrap_or(QueryError::MissingOrganization));
    }

    write_listing(writer, &driver.view(sort_mode))?;
    failure.map_or(Ok(()), Err)
}

/// Stores the organization and sort so the next run starts from them.
fn remember(preferences: &mut PreferenceStore, organization: &str, sort_mode: SortMode) {
    let outcome = preferences
        .set_organization(organization)
        .and_then(|()| preferences.set_sort_mode(sort_mode));
    if let Err(error) = outcome {
        tracing::warn!(%error, "failed to save preferences");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use orgview::github::models::test_support::{organization, repository_batch};
    use orgview::github::{
        ListRepositoriesParams, Organization, OrganizationGateway, PersonalAccessToken,
        RepositoryPage,
    };
    use orgview::{OrgviewConfig, PreferenceStore, QueryError, SortMode};

    use super::run_with_gateway_builder;

    /// Serves `total` repositories ten per page and records credentials.
    #[derive(Clone, Default)]
    struct CountingGateway {
        total: u64,
        organization_error: Option<QueryError>,
        requests: Arc<Mutex<Vec<String>>>,
        authenticated: Arc<Mutex<Vec<bool>>>,
    }

    impl CountingGateway {
        fn note(&self, request: String, credential: Option<&PersonalAccessToken>) {
            self.requests.lock().expect("requests lock").push(request);
            self.authenticated
                .lock()
                .expect("authenticated lock")
                .push(credential.is_some());
        }
    }

    #[async_trait]
    impl OrganizationGateway for CountingGateway {
        async fn resolve_organization(
            &self,
            login: &str,
            credential: Option<&PersonalAccessToken>,
        ) -> Result<Organization, QueryError> {
            self.note(format!("org:{login}"), credential);
            match &self.organization_error {
                Some(error) => Err(error.clone()),
                None => Ok(organization(login, self.total)),
            }
        }

        async fn list_repositories(
            &self,
            login: &str,
            params: &ListRepositoriesParams,
            credential: Option<&PersonalAccessToken>,
        ) -> Result<RepositoryPage, QueryError> {
            self.note(format!("repos:{login}:{}", params.page), credential);
            let first_id = u64::from(params.page - 1) * 10 + 1;
            let count = self.total.saturating_sub(first_id - 1).min(10);
            Ok(RepositoryPage::new(
                repository_batch(first_id, count),
                params.page,
                params.per_page,
            ))
        }
    }

    async fn run_listing(
        config: &OrgviewConfig,
        mut preferences: PreferenceStore,
        gateway: &CountingGateway,
    ) -> (Result<(), QueryError>, String) {
        let mut buffer = Vec::new();
        let captured = gateway.clone();
        let result = run_with_gateway_builder(
            config,
            &mut preferences,
            move |_| Ok(captured),
            &mut buffer,
        )
        .await;
        (result, String::from_utf8(buffer).expect("valid UTF-8"))
    }

    #[tokio::test]
    async fn lists_the_first_page_by_default() {
        let gateway = CountingGateway {
            total: 25,
            ..CountingGateway::default()
        };
        let config = OrgviewConfig {
            org: Some("facebook".to_owned()),
            ..Default::default()
        };

        let (result, output) =
            run_listing(&config, PreferenceStore::in_memory(), &gateway).await;

        result.expect("listing should succeed");
        assert_eq!(
            *gateway.requests.lock().expect("requests lock"),
            vec!["org:facebook", "repos:facebook:1"]
        );
        assert!(output.contains("10 repositories shown (1 pages loaded)"));
        assert!(output.contains("More pages available"));
    }

    #[tokio::test]
    async fn zero_pages_loads_everything() {
        let gateway = CountingGateway {
            total: 14,
            ..CountingGateway::default()
        };
        let config = OrgviewConfig {
            org: Some("facebook".to_owned()),
            pages: 0,
            ..Default::default()
        };

        let (result, output) =
            run_listing(&config, PreferenceStore::in_memory(), &gateway).await;

        result.expect("listing should succeed");
        assert!(output.contains("14 repositories shown (2 pages loaded)"));
        assert!(!output.contains("More pages available"));
    }

    #[tokio::test]
    async fn stored_organization_and_credential_are_used() {
        let gateway = CountingGateway {
            total: 3,
            ..CountingGateway::default()
        };
        let mut preferences = PreferenceStore::in_memory();
        preferences.set_organization("rust-lang").expect("write");
        preferences
            .set_credential(Some(
                PersonalAccessToken::new("ghp_stored").expect("token"),
            ))
            .expect("write");
        preferences.set_sort_mode(SortMode::Forks).expect("write");

        let (result, output) = run_listing(&OrgviewConfig::default(), preferences, &gateway).await;

        result.expect("listing should succeed");
        assert!(output.starts_with("rust-lang (@rust-lang)"));
        assert!(output.contains("sorted by"));
        assert!(
            gateway
                .authenticated
                .lock()
                .expect("authenticated lock")
                .iter()
                .all(|sent| *sent)
        );
    }

    #[tokio::test]
    async fn missing_organization_is_reported() {
        let gateway = CountingGateway::default();

        let (result, output) =
            run_listing(&OrgviewConfig::default(), PreferenceStore::in_memory(), &gateway).await;

        assert_eq!(result, Err(QueryError::MissingOrganization));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn organization_errors_print_nothing() {
        let gateway = CountingGateway {
            organization_error: Some(QueryError::NotFound {
                organization: "thisorgdoesnotexist123".to_owned(),
            }),
            ..CountingGateway::default()
        };
        let config = OrgviewConfig {
            org: Some("thisorgdoesnotexist123".to_owned()),
            ..Default::default()
        };

        let (result, output) =
            run_listing(&config, PreferenceStore::in_memory(), &gateway).await;

        assert!(matches!(result, Err(QueryError::NotFound { .. })));
        assert!(output.is_empty());
        assert_eq!(gateway.requests.lock().expect("requests lock").len(), 1);
    }
}
