//! Shared helper functions for CLI commands

use chrono::NaiveDate;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::catalog::Catalog;
use crate::core::config::Config;
use crate::core::identity::EntityId;

/// Resolve the catalog directory: flag, then config, then ./catalog
pub fn catalog_dir(global: &GlobalOpts, config: &Config) -> PathBuf {
    global
        .catalog
        .clone()
        .or_else(|| config.catalog_dir.clone())
        .unwrap_or_else(|| PathBuf::from("catalog"))
}

/// Load the catalog for a command.
///
/// A missing directory is not an error: the built-in part types are
/// enough for measurement and formula work, so commands stay usable
/// before any catalog files exist.
pub fn load_catalog(global: &GlobalOpts, config: &Config) -> Result<Catalog> {
    let dir = catalog_dir(global, config);
    if dir.is_dir() {
        Catalog::load_dir(&dir).into_diagnostic()
    } else {
        Ok(Catalog::with_builtin_part_types())
    }
}

/// Date parser for clap arguments (ISO format, e.g. 2025-08-15)
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    s.parse()
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

/// Format an EntityId for display, truncating if too long
pub fn format_short_id(id: &EntityId) -> String {
    let s = id.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
