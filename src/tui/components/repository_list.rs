//! Repository list with a trailing load-more sentinel.
//!
//! The list renders only the rows inside the viewport. Below the last
//! repository sits a sentinel region [`SENTINEL_ROWS`] tall; how much of it
//! is on screen is reported by [`sentinel_visibility`] and drives incremental
//! loading.

use crate::github::Repository;
use crate::query::SentinelVisibility;

use super::text_truncate::{fit_to_width, truncate_to_display_width_with_ellipsis};
use crate::tui::state::ListCursor;

/// Height of the sentinel region in rows.
pub const SENTINEL_ROWS: usize = 2;

const NAME_WIDTH: usize = 32;
const LANGUAGE_WIDTH: usize = 12;

/// What the sentinel says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelState {
    /// A page request is in flight.
    Loading,
    /// More pages exist; scrolling here fetches the next one.
    More,
    /// Every page has been loaded.
    End,
    /// Nothing to say (no listing, or paging stopped on an error).
    Hidden,
}

/// Context for rendering the repository list.
#[derive(Debug, Clone)]
pub struct RepositoryListViewContext<'a> {
    /// Repositories in display order.
    pub repositories: &'a [Repository],
    /// Selection and scroll position.
    pub cursor: ListCursor,
    /// Rows available to the list.
    pub visible_height: usize,
    /// Columns available to the list.
    pub max_width: usize,
    /// Sentinel message.
    pub sentinel: SentinelState,
}

/// Component for the repository list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepositoryListComponent;

impl RepositoryListComponent {
    /// Column headings aligned with the rows.
    #[must_use]
    pub fn heading(max_width: usize) -> String {
        let line = format!(
            "  {}  {:>7}  {:>6}  {}  Updated     Description",
            fit_to_width("Repository", NAME_WIDTH),
            "Stars",
            "Forks",
            fit_to_width("Language", LANGUAGE_WIDTH),
        );
        format!("{}\n", truncate_to_display_width_with_ellipsis(&line, max_width))
    }

    /// Renders the visible rows.
    #[must_use]
    pub fn view(ctx: &RepositoryListViewContext<'_>) -> String {
        let count = ctx.repositories.len();
        let start = ctx.cursor.scroll_offset;
        let end = start.saturating_add(ctx.visible_height);
        let mut output = String::new();

        for row in start..end {
            if let Some(repository) = ctx.repositories.get(row) {
                let selected = row == ctx.cursor.position;
                let line = Self::format_row(repository, selected);
                output.push_str(&truncate_to_display_width_with_ellipsis(
                    &line,
                    ctx.max_width,
                ));
                output.push('\n');
            } else if row == count {
                output.push_str(&Self::sentinel_text(ctx.sentinel, count));
                output.push('\n');
            } else {
                break;
            }
        }

        output
    }

    fn format_row(repository: &Repository, selected: bool) -> String {
        let prefix = if selected { ">" } else { " " };
        let language = repository.language.as_deref().unwrap_or("-");
        format!(
            "{prefix} {}  {:>7}  {:>6}  {}  {}  {}",
            fit_to_width(&repository.name, NAME_WIDTH),
            repository.stargazers_count,
            repository.forks_count,
            fit_to_width(language, LANGUAGE_WIDTH),
            repository.updated_at.format("%Y-%m-%d"),
            repository.description_or_default(),
        )
    }

    /// Link and topics of the selected repository, one line.
    ///
    /// Empty when nothing is selected.
    #[must_use]
    pub fn detail(selected: Option<&Repository>, max_width: usize) -> String {
        let Some(repository) = selected else {
            return String::new();
        };
        let line = repository.topic_list().map_or_else(
            || format!("  {}", repository.html_url),
            |topics| format!("  {}  topics: {topics}", repository.html_url),
        );
        format!("{}\n", truncate_to_display_width_with_ellipsis(&line, max_width))
    }

    fn sentinel_text(state: SentinelState, count: usize) -> String {
        match state {
            SentinelState::Loading => "  Loading more repositories...".to_owned(),
            SentinelState::More => format!("  {count} shown, scroll for more"),
            SentinelState::End if count == 0 => "  No public repositories.".to_owned(),
            SentinelState::End => format!("  End of list ({count} repositories)"),
            SentinelState::Hidden => String::new(),
        }
    }
}

/// How much of the sentinel below `count` rows shows in the viewport.
#[must_use]
pub fn sentinel_visibility(
    count: usize,
    scroll_offset: usize,
    visible_height: usize,
) -> SentinelVisibility {
    let viewport_end = scroll_offset.saturating_add(visible_height);
    let sentinel_end = count.saturating_add(SENTINEL_ROWS);
    let visible = viewport_end
        .min(sentinel_end)
        .saturating_sub(scroll_offset.max(count));

    SentinelVisibility::new(
        u16::try_from(visible).unwrap_or(u16::MAX),
        u16::try_from(SENTINEL_ROWS).unwrap_or(u16::MAX),
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        RepositoryListComponent, RepositoryListViewContext, SentinelState, sentinel_visibility,
    };
    use crate::github::Repository;
    use crate::github::models::test_support::{repository, repository_batch};
    use crate::tui::state::ListCursor;

    #[rstest]
    #[case::far_above(30, 0, 10, 0)]
    #[case::touching(10, 0, 11, 1)]
    #[case::fully_visible(10, 4, 8, 2)]
    #[case::scrolled_past_rows(10, 11, 5, 1)]
    #[case::short_list(3, 0, 20, 2)]
    fn sentinel_rows_in_view(
        #[case] count: usize,
        #[case] offset: usize,
        #[case] height: usize,
        #[case] expected: u16,
    ) {
        let visibility = sentinel_visibility(count, offset, height);

        assert_eq!(visibility.visible_rows, expected);
        assert_eq!(visibility.total_rows, 2);
    }

    #[test]
    fn renders_only_the_viewport_and_marks_the_cursor() {
        let repositories = repository_batch(1, 10);
        let output = RepositoryListComponent::view(&RepositoryListViewContext {
            repositories: &repositories,
            cursor: ListCursor {
                position: 3,
                scroll_offset: 2,
            },
            visible_height: 3,
            max_width: 120,
            sentinel: SentinelState::More,
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.first().is_some_and(|line| line.starts_with("  repo-3")));
        assert!(lines.get(1).is_some_and(|line| line.starts_with("> repo-4")));
    }

    #[test]
    fn sentinel_follows_the_last_row() {
        let repositories = repository_batch(1, 2);
        let output = RepositoryListComponent::view(&RepositoryListViewContext {
            repositories: &repositories,
            cursor: ListCursor::default(),
            visible_height: 10,
            max_width: 120,
            sentinel: SentinelState::End,
        });

        assert_eq!(output.lines().count(), 3);
        assert!(output.ends_with("  End of list (2 repositories)\n"));
    }

    #[test]
    fn rows_respect_the_width() {
        let repositories = repository_batch(1, 1);
        let output = RepositoryListComponent::view(&RepositoryListViewContext {
            repositories: &repositories,
            cursor: ListCursor::default(),
            visible_height: 1,
            max_width: 20,
            sentinel: SentinelState::Hidden,
        });

        assert!(output.lines().all(|line| line.chars().count() <= 20));
    }

    #[test]
    fn rows_show_the_description_or_its_fallback() {
        let described = Repository {
            description: Some("Build tooling".to_owned()),
            ..repository(1, 10, 1, "2024-01-01T00:00:00Z")
        };
        let repositories = vec![described, repository(2, 5, 1, "2024-01-01T00:00:00Z")];
        let output = RepositoryListComponent::view(&RepositoryListViewContext {
            repositories: &repositories,
            cursor: ListCursor::default(),
            visible_height: 2,
            max_width: 200,
            sentinel: SentinelState::Hidden,
        });

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines.first().is_some_and(|line| line.ends_with("Build tooling")));
        assert!(
            lines
                .get(1)
                .is_some_and(|line| line.ends_with("No description available."))
        );
    }

    #[test]
    fn detail_shows_the_link_and_topics() {
        let tagged = Repository {
            topics: vec!["cli".to_owned(), "rust".to_owned()],
            ..repository(7, 0, 0, "2024-01-01T00:00:00Z")
        };

        assert_eq!(
            RepositoryListComponent::detail(Some(&tagged), 200),
            "  https://github.com/example/repo-7  topics: cli, rust\n"
        );
        assert_eq!(
            RepositoryListComponent::detail(Some(&repository(8, 0, 0, "2024-01-01T00:00:00Z")), 200),
            "  https://github.com/example/repo-8\n"
        );
        assert_eq!(RepositoryListComponent::detail(None, 200), "");
    }
}
