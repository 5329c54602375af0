//! Client-side ordering of the accumulated repository list.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::github::Repository;

/// Display order for repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most starred first.
    #[default]
    Stars,
    /// Most forked first.
    Forks,
    /// Most recently updated first.
    Updated,
}

impl SortMode {
    /// Every mode, in cycling order.
    pub const ALL: [Self; 3] = [Self::Stars, Self::Forks, Self::Updated];

    /// The mode after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Stars => Self::Forks,
            Self::Forks => Self::Updated,
            Self::Updated => Self::Stars,
        }
    }

    /// Lowercase identifier used in configuration and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Updated => "updated",
        }
    }

    /// Label shown in the dashboard header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stars => "Most stars",
            Self::Forks => "Most forks",
            Self::Updated => "Recently updated",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sort mode string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode `{0}` (expected stars, forks or updated)")]
pub struct ParseSortModeError(String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalised)
            .ok_or_else(|| ParseSortModeError(value.to_owned()))
    }
}

/// Returns the repositories in display order for `mode`.
///
/// The input is left untouched. The sort is stable, so repositories that
/// compare equal keep their fetch order, and sorting an already sorted list
/// is a no-op.
#[must_use]
pub fn sort_repositories(repositories: &[Repository], mode: SortMode) -> Vec<Repository> {
    let mut sorted = repositories.to_vec();
    match mode {
        SortMode::Stars => sorted.sort_by_key(|repository| Reverse(repository.stargazers_count)),
        SortMode::Forks => sorted.sort_by_key(|repository| Reverse(repository.forks_count)),
        SortMode::Updated => sorted.sort_by_key(|repository| Reverse(repository.updated_at)),
    }
    sorted
}
