//! Language breakdown rendered as text bars.

use crate::query::LanguageShare;

use super::text_truncate::{fit_to_width, truncate_to_display_width_with_ellipsis};

const LABEL_WIDTH: usize = 14;
const BAR_WIDTH: usize = 24;

/// Horizontal bar chart of the language breakdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageChartComponent;

impl LanguageChartComponent {
    /// Renders one bar per language, scaled to the most common one.
    ///
    /// Renders nothing for an empty breakdown.
    #[must_use]
    pub fn view(languages: &[LanguageShare], max_width: usize) -> String {
        let Some(largest) = languages.iter().map(|share| share.count).max() else {
            return String::new();
        };

        let mut output = String::from("Languages\n");
        for share in languages {
            let line = format!(
                "  {} {} {}",
                fit_to_width(&share.language, LABEL_WIDTH),
                "#".repeat(bar_length(share.count, largest)),
                share.count
            );
            output.push_str(&truncate_to_display_width_with_ellipsis(&line, max_width));
            output.push('\n');
        }
        output
    }
}

/// Bar length for `count` relative to `largest`; never zero for a
/// non-zero count.
fn bar_length(count: usize, largest: usize) -> usize {
    let scaled = count
        .saturating_mul(BAR_WIDTH)
        .checked_div(largest)
        .unwrap_or(0);
    if count > 0 { scaled.max(1) } else { 0 }
}
