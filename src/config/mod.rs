//
//  skyhook-cli
//  config/mod.rs
//

//! # Configuration Management
//!
//! The CLI's configuration is a small TOML file in the platform config
//! directory (`~/.config/sky/config.toml` on Linux):
//!
//! ```toml
//! server_url = "https://api.skyhook.dev/"
//! default_provider = "aws"
//! request_timeout_secs = 30
//! ```
//!
//! A missing file yields the defaults. The server URL can be overridden per
//! invocation with `--server` or the `SKY_SERVER` environment variable, both
//! handled at the CLI layer.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default control API endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://api.skyhook.dev/";

/// Persistent CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Skyhook control API.
    pub server_url: String,

    /// Provider used when a command does not name one explicitly.
    pub default_provider: Option<String>,

    /// Bound on how long a single API request may wait, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            default_provider: None,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        match fs::read_to_string(Self::path()?) {
            Ok(raw) => Self::parse(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).context("could not read the config file"),
        }
    }

    /// Parses a TOML document into a configuration.
    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("malformed config file")
    }

    /// The platform-specific config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .context("could not determine the config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The server URL as a validated, slash-terminated base.
    pub fn server_url(&self) -> Result<String> {
        let url = Url::parse(&self.server_url)
            .with_context(|| format!("invalid server URL: {}", self.server_url))?;
        let mut base = url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(base)
    }

    /// The configured request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
