//
//  skyhook-cli
//  context/mod.rs
//

//! # Local Repository Context
//!
//! Access to the local git repository's remotes and resolution of which
//! Skyhook application the repository is bound to.
//!
//! The reconciler and commands consume remotes through the [`RemoteStore`]
//! trait rather than `git2` directly; [`GitContext`] is the real
//! implementation, and tests substitute an in-memory fake.

mod git;

pub use git::*;

use std::collections::BTreeMap;

use anyhow::{Context, Result};

/// Name→URL access to a repository's remotes.
///
/// The convention is that the remote named after the product
/// ([`crate::APP_NAME`]) points at exactly one Skyhook application's git
/// endpoint; that name is the only one the reconciler ever inspects or
/// mutates.
pub trait RemoteStore {
    /// Returns the full name→URL mapping of configured remotes.
    fn remotes(&self) -> Result<BTreeMap<String, String>>;

    /// Adds a remote. Fails if the name is already taken.
    fn add_remote(&mut self, name: &str, url: &str) -> Result<()>;

    /// Removes a remote by name.
    fn remove_remote(&mut self, name: &str) -> Result<()>;
}

/// Extracts the app id from a Skyhook git endpoint URL.
///
/// The app id is the final path segment with any `.git` suffix stripped,
/// covering both scp-like (`git@host:blog.git`) and URL-style
/// (`ssh://git@host:2222/blog.git`) endpoints.
pub fn app_from_remote_url(url: &str) -> Option<String> {
    let tail = url
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .unwrap_or(url);
    let app = tail.strip_suffix(".git").unwrap_or(tail);
    if app.is_empty() {
        None
    } else {
        Some(app.to_string())
    }
}

/// Resolves the app an invocation targets.
///
/// An explicit `--app` flag always wins. Otherwise the app is derived from
/// the conventional remote of the enclosing repository; outside a repository,
/// or without that remote, the flag is required.
pub fn resolve_app(explicit: Option<&str>) -> Result<String> {
    if let Some(app) = explicit {
        return Ok(app.to_string());
    }
    let git = GitContext::open()
        .context("not in a git repository; pass --app to name the application")?;
    let url = git
        .remote_url(crate::APP_NAME)?
        .with_context(|| {
            format!(
                "no '{}' remote in this repository; pass --app to name the application",
                crate::APP_NAME
            )
        })?;
    app_from_remote_url(&url).with_context(|| format!("could not parse app id from {url}"))
}
