//
//  skyhook-cli
//  cli/domains.rs
//

//! Custom domain commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::resolve_app;
use crate::output::print_json;

use super::{api_client, GlobalOptions};

/// Manage custom domains
#[derive(Args, Debug)]
pub struct DomainsCommand {
    #[command(subcommand)]
    pub command: DomainsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DomainsSubcommand {
    /// List the app's domains
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Attach a domain to the app
    Add(DomainArgs),

    /// Detach a domain from the app
    Remove(DomainArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Args, Debug)]
pub struct DomainArgs {
    /// The domain name, e.g. www.example.com
    pub domain: String,

    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

impl DomainsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            DomainsSubcommand::List(args) => {
                let app = resolve_app(args.app.as_deref())?;
                let domains = api_client(global)?.list_domains(&app).await?;
                if global.json {
                    return print_json(&domains);
                }
                if domains.is_empty() {
                    println!("No domains attached to {app}.");
                }
                for domain in domains {
                    println!("{domain}");
                }
                Ok(())
            }
            DomainsSubcommand::Add(args) => {
                let app = resolve_app(args.app.as_deref())?;
                api_client(global)?.add_domain(&app, &args.domain).await?;
                println!("Added {} to {app}.", args.domain);
                Ok(())
            }
            DomainsSubcommand::Remove(args) => {
                let app = resolve_app(args.app.as_deref())?;
                api_client(global)?
                    .remove_domain(&app, &args.domain)
                    .await?;
                println!("Removed {} from {app}.", args.domain);
                Ok(())
            }
        }
    }
}
