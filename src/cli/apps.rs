//
//  skyhook-cli
//  cli/apps.rs
//

//! Application management commands.
//!
//! `sky apps create` is the one command with real orchestration: after the
//! server creates the app, the [`reconcile`](crate::reconcile) module wires
//! the app's git endpoint into the local repository without ever clobbering
//! an existing remote silently.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::context::{resolve_app, GitContext, RemoteStore};
use crate::interactive::prompt_confirm;
use crate::output::{print_json, print_table};
use crate::reconcile::{wire_app_remote, RemoteWiring};
use crate::APP_NAME;

use super::{api_client, load_config, Aborted, GlobalOptions};

/// Manage applications
#[derive(Args, Debug)]
pub struct AppsCommand {
    #[command(subcommand)]
    pub command: AppsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AppsSubcommand {
    /// List your applications, grouped by provider
    #[command(visible_alias = "ls")]
    List,

    /// Create a new application
    Create(CreateArgs),

    /// Destroy an application
    Destroy(DestroyArgs),

    /// Show the owner of an application
    Owner(AppArg),

    /// Transfer ownership to another user
    Transfer(TransferArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// The application id (also its server-assigned namespace)
    pub name: String,

    /// The provider to host the application on
    #[arg(long, short = 'p')]
    pub provider: Option<String>,
}

#[derive(Args, Debug)]
pub struct DestroyArgs {
    /// The application to destroy (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct AppArg {
    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// The new owner's username
    pub username: String,

    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

impl AppsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AppsSubcommand::List => list(global).await,
            AppsSubcommand::Create(args) => create(args, global).await,
            AppsSubcommand::Destroy(args) => destroy(args, global).await,
            AppsSubcommand::Owner(args) => owner(args, global).await,
            AppsSubcommand::Transfer(args) => transfer(args, global).await,
        }
    }
}

async fn list(global: &GlobalOptions) -> Result<()> {
    let client = api_client(global)?;
    let apps = client.list_applications().await?;

    if global.json {
        return print_json(&apps);
    }
    if apps.values().all(|names| names.is_empty()) {
        println!("No apps yet. Create one with 'sky apps create NAME'.");
        return Ok(());
    }
    let rows = apps
        .iter()
        .flat_map(|(provider, names)| {
            names
                .iter()
                .map(move |name| vec![name.clone(), provider.clone()])
        })
        .collect();
    print_table(&["APP", "PROVIDER"], rows);
    Ok(())
}

async fn create(args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
    let client = api_client(global)?;
    let config = load_config(global)?;
    let provider = args.provider.clone().or(config.default_provider);

    // A create failure aborts the whole flow; nothing else is attempted.
    client
        .create_application(&args.name, provider.as_deref())
        .await?;
    println!("App {} created.", style(&args.name).green());
    println!();

    let mut git = GitContext::open().ok();
    let no_prompt = global.no_prompt;
    let mut confirm = |existing: &str| -> Result<bool> {
        println!(
            "An existing git remote named {APP_NAME} already exists:\n\n    {existing}\n\n\
             This can happen if you created multiple Skyhook apps for your project."
        );
        if no_prompt {
            return Ok(false);
        }
        prompt_confirm("Replace?")
    };

    let store = git.as_mut().map(|g| g as &mut dyn RemoteStore);
    match wire_app_remote(&client, &args.name, store, &mut confirm).await? {
        RemoteWiring::Bound { url } | RemoteWiring::Replaced { url, .. } => {
            println!("Successfully set remote {APP_NAME} to {url}");
            Ok(())
        }
        RemoteWiring::Declined { .. } => {
            println!(
                "To add the git remote to your project manually, run the following command:\n\n\
                 \x20   {APP_NAME} git remote --app {} --remote REMOTE_NAME",
                args.name
            );
            Err(Aborted.into())
        }
        RemoteWiring::NoRepository => {
            println!(
                "Not in a git repository. To add the git remote to your project manually,\n\
                 run the following command inside your project repository:\n\n\
                 \x20   {APP_NAME} git remote --app {}",
                args.name
            );
            Ok(())
        }
        RemoteWiring::FetchFailed { error } => {
            // The app exists; only the wiring stage failed.
            eprintln!("Could not retrieve the git remote URL: {error}");
            println!(
                "To add the git remote to your project manually, run the following command:\n\n\
                 \x20   {APP_NAME} git remote --app {}",
                args.name
            );
            Ok(())
        }
    }
}

async fn destroy(args: &DestroyArgs, global: &GlobalOptions) -> Result<()> {
    let app = resolve_app(args.app.as_deref())?;
    if !args.yes {
        if global.no_prompt || !prompt_confirm(&format!("Destroy app {app}? This cannot be undone"))? {
            println!("Aborted.");
            return Err(Aborted.into());
        }
    }

    let client = api_client(global)?;
    client.delete_application(&app).await?;
    println!("App {} destroyed.", style(&app).red());
    Ok(())
}

async fn owner(args: &AppArg, global: &GlobalOptions) -> Result<()> {
    let app = resolve_app(args.app.as_deref())?;
    let client = api_client(global)?;
    let owner = client.get_owner(&app).await?;
    if global.json {
        return print_json(&serde_json::json!({ "app": app, "owner": owner }));
    }
    println!("{owner}");
    Ok(())
}

async fn transfer(args: &TransferArgs, global: &GlobalOptions) -> Result<()> {
    let app = resolve_app(args.app.as_deref())?;
    let client = api_client(global)?;
    client.set_owner(&app, &args.username).await?;
    println!("App {app} transferred to {}.", args.username);
    Ok(())
}
