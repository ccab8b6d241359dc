//
//  skyhook-cli
//  util/mod.rs
//

//! Small shared helpers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::BaseDirs;

/// Expands a leading `~/` to the user's home directory.
///
/// Paths without a tilde pass through unchanged. A bare `~` expands to the
/// home directory itself.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        let dirs = BaseDirs::new().context("could not determine the home directory")?;
        return Ok(dirs.home_dir().to_path_buf());
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let dirs = BaseDirs::new().context("could not determine the home directory")?;
        return Ok(dirs.home_dir().join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Truncates long key material for display, keeping both ends visible.
///
/// Counts characters, not bytes, so multibyte input (a key comment like
/// `user@höst`) never splits mid-character.
pub fn truncate_middle(text: &str, keep: usize) -> String {
    const DOTS: &str = "...";
    let total = text.chars().count();
    if total <= keep * 2 + DOTS.len() {
        return text.to_string();
    }
    let head: String = text.chars().take(keep).collect();
    let tail: String = text.chars().skip(total - keep).collect();
    format!("{head}{DOTS}{tail}")
}
