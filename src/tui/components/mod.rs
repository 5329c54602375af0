//! UI components for the dashboard.
//!
//! Components are stateless renderers: each takes a view context and returns
//! plain text lines.

mod language_chart;
mod organization_summary;
mod repository_list;
mod text_truncate;

pub use language_chart::LanguageChartComponent;
pub use organization_summary::OrganizationSummaryComponent;
pub use repository_list::{
    RepositoryListComponent, RepositoryListViewContext, SENTINEL_ROWS, SentinelState,
    sentinel_visibility,
};
pub(crate) use text_truncate::truncate_to_display_width_with_ellipsis;
