//
//  skyhook-cli
//  lib.rs
//

//! # Skyhook CLI Library
//!
//! Core library for the `sky` command-line client for the Skyhook PaaS.
//!
//! ## Overview
//!
//! Skyhook hosts applications on one of several infrastructure providers and
//! exposes a JSON control API for managing them. This library turns high-level
//! operations ("create app", "set env vars", "add domain") into WSSE-signed
//! HTTP requests, classifies server responses into a typed error taxonomy, and
//! reconciles newly created applications with pre-existing local git remotes.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: The signed HTTP client for the Skyhook control API
//! - [`auth`]: Credentials, WSSE request signing, and credential persistence
//! - [`config`]: Configuration file management
//! - [`context`]: Local git repository access and app-name resolution
//! - [`reconcile`]: Remote-wiring reconciliation for freshly created apps
//! - [`output`]: Output formatting (table and JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Small shared helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use skyhook_cli::api::ApiClient;
//! use skyhook_cli::auth::Credentials;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = Credentials::new("alice", "s3cret-api-key");
//! let client = ApiClient::new("https://api.skyhook.dev/", credentials, Duration::from_secs(30))?;
//! let apps = client.list_applications().await?;
//! for (provider, names) in apps {
//!     println!("{provider}: {names:?}");
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API. Each command module handles parsing and execution of its
/// respective functionality.
pub mod cli;

/// API client for the Skyhook control API.
///
/// Provides [`api::ApiClient`], one typed async method per server operation,
/// uniform WSSE-signed request execution, and the [`api::ApiError`] taxonomy.
pub mod api;

/// Credentials, WSSE signing, and credential persistence.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/sky/config.toml`
/// - macOS: `~/Library/Application Support/sky/config.toml`
/// - Windows: `%APPDATA%\sky\config.toml`
pub mod config;

/// Local git repository access.
///
/// Wraps `git2` behind the small [`context::RemoteStore`] seam the reconciler
/// consumes, and resolves which Skyhook app the current repository is bound to.
pub mod context;

/// Remote-wiring reconciliation for `sky apps create`.
pub mod reconcile;

/// Output formatting for table and JSON modes.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Small shared helpers (tilde expansion, truncation).
pub mod util;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary. Also the conventional name of the git remote
/// that binds a local repository to its Skyhook application, which makes it
/// the conflict key during remote reconciliation.
pub const APP_NAME: &str = "sky";

/// Application version constant, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes allowing scripts to programmatically detect the
/// outcome of CLI operations.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments (clap's conventional code).
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// The user is not logged in or the server rejected the stored
    /// credentials. Run `sky login` to (re-)authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// Operation cancelled by the user, typically by declining a
    /// destructive confirmation prompt.
    pub const CANCELLED: i32 = 16;
}
