//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use orgview::query::QueryView;
use orgview::{Organization, QueryError};

/// Writes the organization profile, language breakdown and repositories.
///
/// # Errors
///
/// Returns [`QueryError::Io`] when writing fails.
pub fn write_listing<W: Write>(writer: &mut W, view: &QueryView) -> Result<(), QueryError> {
    if let Some(organization) = &view.organization {
        write_profile(writer, organization)?;
    }

    if !view.languages.is_empty() {
        writeln!(writer).map_err(|e| io_error(&e))?;
        writeln!(writer, "Languages:").map_err(|e| io_error(&e))?;
        for share in &view.languages {
            writeln!(writer, "  {:<16} {}", share.language, share.count)
                .map_err(|e| io_error(&e))?;
        }
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Repositories (sorted by {}):",
        view.sort_mode.label()
    )
    .map_err(|e| io_error(&e))?;
    for repository in &view.repositories {
        let language = repository.language.as_deref().unwrap_or("-");
        writeln!(
            writer,
            "  {} [{language}] stars:{} forks:{} updated:{}",
            repository.full_name,
            repository.stargazers_count,
            repository.forks_count,
            repository.updated_at.format("%Y-%m-%d"),
        )
        .map_err(|e| io_error(&e))?;
        writeln!(writer, "      {}", repository.description_or_default())
            .map_err(|e| io_error(&e))?;
        let link = repository.topic_list().map_or_else(
            || repository.html_url.clone(),
            |topics| format!("{}  topics: {topics}", repository.html_url),
        );
        writeln!(writer, "      {link}").map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "{} repositories shown ({} pages loaded)",
        view.repositories.len(),
        view.pages_loaded
    )
    .map_err(|e| io_error(&e))?;

    if view.has_more {
        writeln!(writer, "More pages available; use --pages 0 to load all.")
            .map_err(|e| io_error(&e))?;
    }

    Ok(())
}

fn write_profile<W: Write>(writer: &mut W, organization: &Organization) -> Result<(), QueryError> {
    writeln!(
        writer,
        "{} (@{})",
        organization.display_name(),
        organization.login
    )
    .map_err(|e| io_error(&e))?;
    if let Some(description) = organization
        .description
        .as_deref()
        .filter(|text| !text.trim().is_empty())
    {
        writeln!(writer, "{description}").map_err(|e| io_error(&e))?;
    }
    writeln!(
        writer,
        "{} public repositories  {}",
        organization.public_repos, organization.html_url
    )
    .map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`QueryError::Io`].
pub(crate) fn io_error(error: &io::Error) -> QueryError {
    QueryError::Io {
        message: error.to_string(),
    }
}
