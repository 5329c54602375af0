//! Language breakdown of the accumulated repositories.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::github::Repository;

/// Languages shown in the breakdown.
pub const MAX_LANGUAGES: usize = 6;

/// Number of repositories using one primary language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageShare {
    /// Language name as reported by GitHub.
    pub language: String,
    /// Repositories whose primary language it is.
    pub count: usize,
}

/// Counts primary languages, most common first, keeping the top six.
///
/// Repositories without a language are skipped. Equal counts are ordered by
/// language name.
#[must_use]
pub fn language_breakdown(repositories: &[Repository]) -> Vec<LanguageShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for language in repositories
        .iter()
        .filter_map(|repository| repository.language.as_deref())
    {
        let entry = counts.entry(language).or_default();
        *entry = entry.saturating_add(1);
    }

    let mut shares: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language: language.to_owned(),
            count,
        })
        .collect();
    shares.sort_by_key(|share| Reverse(share.count));
    shares.truncate(MAX_LANGUAGES);
    shares
}
