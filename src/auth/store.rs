//
//  skyhook-cli
//  auth/store.rs
//

//! # Credential Persistence
//!
//! Stores the logged-in user's credentials as JSON in the platform config
//! directory (`~/.config/sky/credentials.json` on Linux).
//!
//! Writes are crash-atomic: the new content is written to a sibling temp file
//! and renamed over the old one, so an interruption between read and write
//! can never leave a half-written credentials file behind.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::Credentials;

/// File-backed storage for the current user's credentials.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Opens the store at the default platform location.
    ///
    /// The containing directory is created on first use.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .context("could not determine the config directory")?;
        fs::create_dir_all(dirs.config_dir()).with_context(|| {
            format!("could not create {}", dirs.config_dir().display())
        })?;
        Ok(Self {
            path: dirs.config_dir().join("credentials.json"),
        })
    }

    /// Opens the store at an explicit path. Used by tests.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored credentials, if any.
    ///
    /// A missing file means "not logged in" and is not an error; a present
    /// but unreadable or unparsable file is.
    pub fn load(&self) -> Result<Option<Credentials>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("could not read {}", self.path.display()))
            }
        };
        let creds = serde_json::from_str(&raw)
            .with_context(|| format!("malformed credentials file {}", self.path.display()))?;
        Ok(Some(creds))
    }

    /// Persists credentials, replacing any previous ones.
    ///
    /// Write-then-rename keeps the replacement atomic with respect to a
    /// crash mid-write.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(credentials)?;
        fs::write(&tmp, raw)
            .with_context(|| format!("could not write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("could not replace {}", self.path.display()))?;
        Ok(())
    }

    /// Removes the stored credentials. Idempotent.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("could not remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));

        store
            .save(&Credentials::new("alice", "topsecret"))
            .unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.username, "alice");
        assert_eq!(loaded.secret_key, "topsecret");

        // The temp file used for the atomic rename must not linger.
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, ["credentials.json"]);
    }

    #[test]
    fn save_replaces_previous_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));

        store.save(&Credentials::new("alice", "old")).unwrap();
        store.save(&Credentials::new("alice", "new")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().secret_key, "new");
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));

        store.save(&Credentials::new("alice", "key")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
