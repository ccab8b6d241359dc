//
//  skyhook-cli
//  cli/mod.rs
//

//! CLI command definitions using clap derive macros

mod apps;
mod auth;
mod completion;
mod domains;
mod env;
mod git;
mod keys;
mod sharing;

pub use apps::AppsCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use domains::DomainsCommand;
pub use env::EnvCommand;
pub use git::GitCommand;
pub use keys::KeysCommand;
pub use sharing::SharingCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::{ApiClient, ApiError};
use crate::auth::CredentialStore;
use crate::config::Config;

/// Skyhook CLI - Manage your Skyhook apps from the command line
#[derive(Parser, Debug)]
#[command(
    name = "sky",
    version,
    about = "Manage your Skyhook apps from the command line",
    long_about = "sky is the command-line client for the Skyhook PaaS.\n\n\
                  It manages applications, environment variables, domains, collaborators,\n\
                  and SSH keys through the Skyhook control API.",
    propagate_version = true,
    after_help = "Use 'sky <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Base URL of the Skyhook control API
    #[arg(long, global = true, env = "SKY_SERVER")]
    pub server: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts (confirmations are declined)
    #[arg(long, global = true, env = "SKY_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with Skyhook
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage applications
    #[command(visible_alias = "a")]
    Apps(AppsCommand),

    /// Manage environment variables
    Env(EnvCommand),

    /// Manage custom domains
    Domains(DomainsCommand),

    /// Manage collaborators
    Sharing(SharingCommand),

    /// Manage SSH public keys
    Keys(KeysCommand),

    /// Wire the app's git remote manually
    Git(GitCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Raised when the user declines a destructive confirmation.
///
/// The binary maps this to the dedicated "cancelled" exit code so scripts
/// can tell a non-destructive abort from a failure.
#[derive(Debug, thiserror::Error)]
#[error("aborted")]
pub struct Aborted;

/// Loads the config, applying the per-invocation server override.
pub(crate) fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(server) = &global.server {
        config.server_url = server.clone();
    }
    Ok(config)
}

/// Builds an API client from stored credentials and the effective config.
///
/// Missing credentials surface as an authentication error, so the binary
/// exits with the auth code and the user is pointed at `sky auth login`.
pub(crate) fn api_client(global: &GlobalOptions) -> Result<ApiClient> {
    let config = load_config(global)?;
    let credentials = CredentialStore::open()?
        .load()?
        .ok_or(ApiError::InvalidCredentials(
            "not logged in; run 'sky auth login' first",
        ))?;
    let client = ApiClient::new(&config.server_url()?, credentials, config.request_timeout())?;
    Ok(client)
}
