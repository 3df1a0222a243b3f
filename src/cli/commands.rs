//! Subcommand procedures.
//!
//! Each procedure writes its report to `out` and returns the process exit
//! code; hard failures (unreadable files and the like) come back as errors.

use crate::delimiter;
use crate::session::storage::load_session_from;
use crate::tab::TabManager;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tabdeck_config::{Config, ContentDelimiter, Units};

/// List the tabs of the session file at `path`
pub fn inspect(out: &mut impl Write, path: &Path) -> Result<i32> {
    let Some(snapshot) = load_session_from(path)? else {
        writeln!(out, "No saved session at {}", path.display())?;
        return Ok(0);
    };

    writeln!(
        out,
        "{} tab(s) in {}{}",
        snapshot.ids.len(),
        path.display(),
        snapshot
            .saved_at
            .as_deref()
            .map(|at| format!(" (saved {at})"))
            .unwrap_or_default()
    )?;

    for tab in snapshot.ordered_tabs() {
        let active = if snapshot.active_tab_id == Some(tab.id) {
            '*'
        } else {
            ' '
        };
        let dirty = if tab.is_dirty { '+' } else { ' ' };
        writeln!(
            out,
            "{active}{dirty} {:<24} {:<12} {}/{}",
            tab.filename,
            tab.metadata.language_name,
            tab.content_size(),
            tab.config.max_content_delimiter
        )?;
    }

    let missing = snapshot.ids.len() - snapshot.ordered_tabs().count();
    if missing > 0 {
        writeln!(out, "warning: {missing} id(s) without a tab entity")?;
    }
    Ok(0)
}

/// Restore the session file at `path` and report whether it is consistent
pub fn check(out: &mut impl Write, config: &Config, path: &Path) -> Result<i32> {
    let Some(snapshot) = load_session_from(path)? else {
        writeln!(out, "No saved session at {}", path.display())?;
        return Ok(0);
    };

    let mut manager = TabManager::with_config(config)?;
    match manager.restore(snapshot) {
        Ok(()) => {
            writeln!(out, "ok: {} tab(s)", manager.tab_count())?;
            Ok(0)
        }
        Err(e) => {
            log::warn!("Session check failed for {:?}: {}", path, e);
            writeln!(out, "invalid: {e}")?;
            Ok(1)
        }
    }
}

/// Measure a file against a delimiter built from the arguments and config
pub fn measure(
    out: &mut impl Write,
    config: &Config,
    path: &Path,
    units: Option<&str>,
    limit: Option<usize>,
    truncate: bool,
) -> Result<i32> {
    let defaults = config.tab_defaults.max_content_delimiter;
    let units = match units {
        Some(raw) => raw.parse::<Units>()?,
        None => defaults.units,
    };
    let limit = limit.unwrap_or(defaults.limit);
    if limit == 0 {
        anyhow::bail!("Content limit must be at least 1");
    }
    let delimiter = ContentDelimiter::new(limit, units);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    let size = delimiter::measure(&content, units);
    let over = delimiter::is_over_limit(&content, &delimiter);

    writeln!(
        out,
        "{}: {} {} (limit {}){}",
        path.display(),
        size,
        units,
        limit,
        if over { ", over limit" } else { "" }
    )?;

    if truncate {
        out.write_all(delimiter::truncate(&content, &delimiter).as_bytes())?;
        writeln!(out)?;
    }
    Ok(0)
}

/// Print the effective configuration, or just where it lives
pub fn show_config(
    out: &mut impl Write,
    config: &Config,
    config_path: &Path,
    path_only: bool,
) -> Result<i32> {
    if path_only {
        writeln!(out, "{}", config_path.display())?;
    } else {
        write!(out, "{}", config.to_yaml()?)?;
    }
    Ok(0)
}
