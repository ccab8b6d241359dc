//
//  skyhook-cli
//  cli/env.rs
//

//! Environment variable commands.
//!
//! `set` and `unset` go through the same server operation: a binding with a
//! value sets the key, a binding with a null value unsets it. Variables not
//! named in the request are left unchanged by the server.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::context::resolve_app;
use crate::output::{print_json, print_table};

use super::{api_client, GlobalOptions};

/// Manage environment variables
#[derive(Args, Debug)]
pub struct EnvCommand {
    #[command(subcommand)]
    pub command: EnvSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EnvSubcommand {
    /// Show the app's environment variables
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Set one or more KEY=VALUE bindings
    Set(SetArgs),

    /// Unset one or more keys
    Unset(UnsetArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Bindings in KEY=VALUE form
    #[arg(required = true)]
    pub bindings: Vec<String>,

    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// The keys to unset
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// The application (defaults to the app bound to this repo)
    #[arg(long)]
    pub app: Option<String>,
}

impl EnvCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            EnvSubcommand::List(args) => list(args, global).await,
            EnvSubcommand::Set(args) => set(args, global).await,
            EnvSubcommand::Unset(args) => unset(args, global).await,
        }
    }
}

/// Splits `KEY=VALUE` at the first equals sign; the value may itself
/// contain `=`.
fn parse_binding(binding: &str) -> Result<(String, String)> {
    match binding.split_once('=') {
        Some((key, _)) if key.is_empty() => bail!("empty key in binding '{binding}'"),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => bail!("expected KEY=VALUE, got '{binding}'"),
    }
}

async fn list(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let app = resolve_app(args.app.as_deref())?;
    let client = api_client(global)?;
    let env = client.get_env(&app).await?;

    if global.json {
        return print_json(&env);
    }
    if env.is_empty() {
        println!("No environment variables set for {app}.");
        return Ok(());
    }
    let rows = env
        .into_iter()
        .map(|(key, value)| vec![key, value])
        .collect();
    print_table(&["KEY", "VALUE"], rows);
    Ok(())
}

async fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let app = resolve_app(args.app.as_deref())?;
    let mut bindings: BTreeMap<String, Option<String>> = BTreeMap::new();
    for binding in &args.bindings {
        let (key, value) = parse_binding(binding)?;
        bindings.insert(key, Some(value));
    }

    let client = api_client(global)?;
    client.set_env(&app, &bindings).await?;
    for key in bindings.keys() {
        println!("Set {key} on {app}.");
    }
    Ok(())
}

async fn unset(args: &UnsetArgs, global: &GlobalOptions) -> Result<()> {
    let app = resolve_app(args.app.as_deref())?;
    let bindings: BTreeMap<String, Option<String>> = args
        .keys
        .iter()
        .map(|key| (key.clone(), None))
        .collect();

    let client = api_client(global)?;
    client.set_env(&app, &bindings).await?;
    for key in bindings.keys() {
        println!("Unset {key} on {app}.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_splits_at_first_equals() {
        assert_eq!(
            parse_binding("DATABASE_URL=postgres://u:p@h/db?x=1").unwrap(),
            (
                "DATABASE_URL".to_string(),
                "postgres://u:p@h/db?x=1".to_string()
            )
        );
    }

    #[test]
    fn empty_value_is_allowed() {
        assert_eq!(
            parse_binding("FLAG=").unwrap(),
            ("FLAG".to_string(), String::new())
        );
    }

    #[test]
    fn missing_equals_is_rejected() {
        assert!(parse_binding("JUSTAKEY").is_err());
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(parse_binding("=value").is_err());
    }
}
