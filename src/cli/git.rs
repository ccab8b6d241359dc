//
//  skyhook-cli
//  cli/git.rs
//

//! Manual remote wiring.
//!
//! This is the command the degraded paths of `sky apps create` point users
//! at: it fetches the app's git endpoint and binds it under the requested
//! remote name, with the same explicit-confirmation rule for collisions.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::context::{resolve_app, GitContext, RemoteStore};
use crate::interactive::prompt_confirm;

use super::{api_client, Aborted, GlobalOptions};

/// Wire the app's git remote manually
#[derive(Args, Debug)]
pub struct GitCommand {
    #[command(subcommand)]
    pub command: GitSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GitSubcommand {
    /// Add (or replace) the git remote pointing at the app
    Remote(RemoteArgs),
}

#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,

    /// The remote name to bind
    #[arg(long, default_value = crate::APP_NAME)]
    pub remote: String,
}

impl GitCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            GitSubcommand::Remote(args) => remote(args, global).await,
        }
    }
}

async fn remote(args: &RemoteArgs, global: &GlobalOptions) -> Result<()> {
    let app = resolve_app(args.app.as_deref())?;
    let client = api_client(global)?;
    let url = client.get_git_remote(&app).await?;

    let mut git = GitContext::open().context("not in a git repository")?;
    let remotes = git.remotes()?;
    if let Some(existing) = remotes.get(&args.remote) {
        println!(
            "An existing git remote named {} already exists:\n\n    {existing}\n",
            args.remote
        );
        if global.no_prompt || !prompt_confirm("Replace?")? {
            println!("Aborted.");
            return Err(Aborted.into());
        }
        git.remove_remote(&args.remote)?;
    }
    git.add_remote(&args.remote, &url)?;
    println!("Successfully set remote {} to {url}", args.remote);
    Ok(())
}
