//
//  skyhook-cli
//  cli/keys.rs
//

//! SSH public key commands.
//!
//! Keys are registered per provider; `--provider` falls back to the
//! configured `default_provider` when omitted.

use std::fs;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::output::{print_json, print_table};
use crate::util::{expand_tilde, truncate_middle};

use super::{api_client, load_config, GlobalOptions};

/// Manage SSH public keys
#[derive(Args, Debug)]
pub struct KeysCommand {
    #[command(subcommand)]
    pub command: KeysSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum KeysSubcommand {
    /// List your keys, grouped by provider
    #[command(visible_alias = "ls")]
    List,

    /// Register a public key
    Add(AddArgs),

    /// Remove a key by its label
    Remove(RemoveArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Human-readable label for the key
    pub name: String,

    /// Path to the public key file
    #[arg(default_value = "~/.ssh/id_rsa.pub")]
    pub path: String,

    /// The provider to register the key on
    #[arg(long, short = 'p')]
    pub provider: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// The label the key was registered under
    pub name: String,

    /// The provider to remove the key from
    #[arg(long, short = 'p')]
    pub provider: Option<String>,
}

impl KeysCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            KeysSubcommand::List => list(global).await,
            KeysSubcommand::Add(args) => add(args, global).await,
            KeysSubcommand::Remove(args) => remove(args, global).await,
        }
    }
}

fn resolve_provider(explicit: Option<&str>, global: &GlobalOptions) -> Result<String> {
    if let Some(provider) = explicit {
        return Ok(provider.to_string());
    }
    load_config(global)?
        .default_provider
        .context("no provider given; pass --provider or set default_provider in the config")
}

async fn list(global: &GlobalOptions) -> Result<()> {
    let client = api_client(global)?;
    let keys = client.list_keys().await?;

    if global.json {
        return print_json(&keys);
    }
    if keys.values().all(|entries| entries.is_empty()) {
        println!("No keys yet. Add one with 'sky keys add NAME [PATH] --provider PROVIDER'.");
        return Ok(());
    }
    let rows = keys
        .iter()
        .flat_map(|(provider, entries)| {
            entries.iter().map(move |entry| {
                vec![
                    entry.key_name.clone(),
                    provider.clone(),
                    truncate_middle(&entry.key, 20),
                ]
            })
        })
        .collect();
    print_table(&["NAME", "PROVIDER", "KEY"], rows);
    Ok(())
}

async fn add(args: &AddArgs, global: &GlobalOptions) -> Result<()> {
    let provider = resolve_provider(args.provider.as_deref(), global)?;
    let path = expand_tilde(&args.path)?;
    let key = fs::read_to_string(&path)
        .with_context(|| format!("could not read public key {}", path.display()))?;

    let client = api_client(global)?;
    client.add_key(&args.name, key.trim_end(), &provider).await?;
    println!("Added key {} to {provider}.", args.name);
    Ok(())
}

async fn remove(args: &RemoveArgs, global: &GlobalOptions) -> Result<()> {
    let provider = resolve_provider(args.provider.as_deref(), global)?;
    let client = api_client(global)?;
    client.remove_key(&args.name, &provider).await?;
    println!("Removed key {} from {provider}.", args.name);
    Ok(())
}
