//
//  skyhook-cli
//  context/git.rs
//

//! # Git Repository Access
//!
//! Thin wrapper over `git2` implementing [`RemoteStore`] for the repository
//! that encloses the current working directory.
//!
//! ## Notes
//!
//! - Uses libgit2 via the `git2` crate for reliable cross-platform support
//! - `discover` walks up directories to find the repository root, so the CLI
//!   works from any subdirectory of a project

use std::collections::BTreeMap;

use anyhow::Result;
use git2::Repository;

use super::RemoteStore;

/// Handle to the enclosing git repository.
///
/// # Example
///
/// ```rust,no_run
/// use skyhook_cli::context::{GitContext, RemoteStore};
///
/// if let Ok(git) = GitContext::open() {
///     for (name, url) in git.remotes()? {
///         println!("{name} -> {url}");
///     }
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct GitContext {
    repo: Repository,
}

impl GitContext {
    /// Opens the repository containing the current working directory.
    ///
    /// Walks up the directory tree until a `.git` directory is found; an
    /// error here means "not inside a repository", which callers treat as a
    /// degraded-but-valid state rather than a failure.
    pub fn open() -> Result<Self> {
        let repo = Repository::discover(".")?;
        Ok(Self { repo })
    }

    /// Opens the repository at an explicit path, without discovery.
    pub fn open_at(path: &std::path::Path) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(Self { repo })
    }

    /// Returns the fetch URL of a remote, or `None` if the remote does not
    /// exist or has no URL configured.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(_) => Ok(None),
        }
    }
}

impl RemoteStore for GitContext {
    fn remotes(&self) -> Result<BTreeMap<String, String>> {
        let mut map = BTreeMap::new();
        for name in self.repo.remotes()?.iter().flatten() {
            if let Some(url) = self.remote_url(name)? {
                map.insert(name.to_string(), url);
            }
        }
        Ok(map)
    }

    fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        self.repo.remote(name, url)?;
        Ok(())
    }

    fn remove_remote(&mut self, name: &str) -> Result<()> {
        self.repo.remote_delete(name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RemoteStore;

    fn fresh_repo(dir: &std::path::Path) -> GitContext {
        Repository::init(dir).unwrap();
        GitContext::open_at(dir).unwrap()
    }

    #[test]
    fn add_list_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut git = fresh_repo(dir.path());

        assert!(git.remotes().unwrap().is_empty());

        git.add_remote("sky", "git@skyhook.dev:blog.git").unwrap();
        let remotes = git.remotes().unwrap();
        assert_eq!(remotes["sky"], "git@skyhook.dev:blog.git");
        assert_eq!(
            git.remote_url("sky").unwrap().as_deref(),
            Some("git@skyhook.dev:blog.git")
        );

        git.remove_remote("sky").unwrap();
        assert!(git.remotes().unwrap().is_empty());
    }

    #[test]
    fn missing_remote_url_is_none_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let git = fresh_repo(dir.path());
        assert!(git.remote_url("nope").unwrap().is_none());
    }

    #[test]
    fn duplicate_add_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut git = fresh_repo(dir.path());
        git.add_remote("sky", "git@skyhook.dev:a.git").unwrap();
        assert!(git.add_remote("sky", "git@skyhook.dev:b.git").is_err());
    }
}
