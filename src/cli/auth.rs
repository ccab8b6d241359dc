//
//  skyhook-cli
//  cli/auth.rs
//

//! Authentication commands.
//!
//! `sky auth login` checks the entered credentials against the server before
//! persisting anything, so a typo'd API key never ends up on disk.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::{ApiClient, ApiError};
use crate::auth::{CredentialStore, Credentials};
use crate::interactive::{prompt_input, prompt_password};

use super::{load_config, GlobalOptions};

/// Authenticate with Skyhook
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: Option<AuthSubcommand>,

    #[command(flatten)]
    pub login: LoginArgs,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with your username and API key
    Login(LoginArgs),

    /// Forget the stored credentials
    Logout,

    /// Show who you are logged in as
    Status,
}

#[derive(Args, Debug, Default)]
pub struct LoginArgs {
    /// Your Skyhook username
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// The API key from the Skyhook dashboard
    #[arg(long, short = 'a')]
    pub api_key: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            // `sky login` (the alias) takes the flattened args directly.
            None => login(&self.login, global).await,
            Some(AuthSubcommand::Login(args)) => login(args, global).await,
            Some(AuthSubcommand::Logout) => logout(),
            Some(AuthSubcommand::Status) => status(global).await,
        }
    }
}

/// Prompts for anything not given as a flag, probes the server, and persists
/// the credentials only after they are accepted.
async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let config = load_config(global)?;

    let username = match &args.username {
        Some(username) => username.clone(),
        None => prompt_input("Username")?,
    };
    let api_key = match &args.api_key {
        Some(api_key) => api_key.clone(),
        None => {
            println!(
                "Get your API key from {}",
                style(format!("{}dashboard/api-key/", config.server_url()?)).underlined()
            );
            prompt_password("API key")?
        }
    };

    print!("Checking your credentials... ");
    std::io::Write::flush(&mut std::io::stdout())?;
    let credentials = Credentials::new(username, api_key);
    let client = ApiClient::new(
        &config.server_url()?,
        credentials.clone(),
        config.request_timeout(),
    )?;

    match client.test_credentials().await {
        Ok(()) => {
            println!("{}", style("OK").green());
            CredentialStore::open()?.save(&credentials)?;
            println!("Logged in as {}.", credentials.username);
            Ok(())
        }
        Err(err @ ApiError::Unauthorized { .. }) => {
            println!("{}", style("invalid").red());
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn logout() -> Result<()> {
    CredentialStore::open()?.clear()?;
    println!("Logged out.");
    Ok(())
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let config = load_config(global)?;
    let Some(credentials) = CredentialStore::open()?.load()? else {
        println!("Not logged in. Run 'sky auth login' first.");
        return Ok(());
    };

    let client = ApiClient::new(
        &config.server_url()?,
        credentials.clone(),
        config.request_timeout(),
    )?;
    match client.test_credentials().await {
        Ok(()) => {
            println!(
                "Logged in as {} on {}",
                style(&credentials.username).bold(),
                config.server_url()?
            );
            Ok(())
        }
        Err(err @ ApiError::Unauthorized { .. }) => {
            println!(
                "Stored credentials for {} were rejected by the server.",
                credentials.username
            );
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
