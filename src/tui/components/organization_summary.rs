//! Organization profile and status banners.

use crate::github::Organization;
use crate::query::{ErrorState, FetchPhase, QueryView};

use super::text_truncate::{first_line, truncate_to_display_width_with_ellipsis};

/// Renders the banner for the current state followed by the profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationSummaryComponent;

impl OrganizationSummaryComponent {
    /// Renders the summary block, one line per entry.
    #[must_use]
    pub fn view(view: &QueryView, max_width: usize) -> String {
        let mut lines = Self::banner(view);
        if let Some(organization) = &view.organization {
            lines.extend(Self::profile(organization));
        }

        lines
            .iter()
            .map(|line| format!("{}\n", truncate_to_display_width_with_ellipsis(line, max_width)))
            .collect()
    }

    fn banner(view: &QueryView) -> Vec<String> {
        match view.error {
            ErrorState::RateLimited => vec![
                "GitHub API rate limit reached. Press t to add a personal access token.".to_owned(),
                format!(
                    "  {}",
                    view.error_message.as_deref().unwrap_or("rate limit exceeded")
                ),
            ],
            ErrorState::NotFound => vec![format!(
                "Organization `{}` was not found. Press / to try another name.",
                view.query
            )],
            ErrorState::Transient => vec![format!(
                "Request failed: {}. Press / then Enter to retry.",
                view.error_message.as_deref().unwrap_or("unknown error")
            )],
            ErrorState::None => match view.phase {
                FetchPhase::Idle => vec!["Press / and type an organization name.".to_owned()],
                FetchPhase::ResolvingOrg => vec![format!("Looking up {}...", view.query)],
                _ => Vec::new(),
            },
        }
    }

    fn profile(organization: &Organization) -> Vec<String> {
        let mut lines = vec![format!(
            "{} (@{})",
            organization.display_name(),
            organization.login
        )];
        if let Some(description) = organization
            .description
            .as_deref()
            .map(first_line)
            .filter(|text| !text.is_empty())
        {
            lines.push(description.to_owned());
        }
        lines.push(format!(
            "{} public repositories  {}",
            organization.public_repos, organization.html_url
        ));
        lines
    }
}
