//! CLI operation mode handlers.
//!
//! - [`listing`]: print one organization's profile and repositories
//! - [`dashboard`]: interactive terminal dashboard
//! - [`migrations`]: database schema migrations
//!
//! Preference loading shared by the modes lives in [`preferences`]; output
//! formatting in [`output`].

pub mod dashboard;
pub mod listing;
pub mod migrations;
pub mod output;
pub mod preferences;
