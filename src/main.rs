//
//  skyhook-cli
//  main.rs
//

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skyhook_cli::api::ApiError;
use skyhook_cli::cli::{Aborted, Cli, Commands};
use skyhook_cli::exit_codes;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("SKY_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Picks the exit code for a failed invocation.
///
/// Authentication failures (rejected or missing credentials) and declined
/// confirmations get their own codes so scripts can distinguish them from
/// generic failure.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if cause.downcast_ref::<Aborted>().is_some() {
            return exit_codes::CANCELLED;
        }
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            if api.is_auth_error() {
                return exit_codes::AUTH_ERROR;
            }
        }
    }
    exit_codes::ERROR
}

/// Main command dispatcher
async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Apps(cmd) => cmd.run(&cli.global).await,
        Commands::Env(cmd) => cmd.run(&cli.global).await,
        Commands::Domains(cmd) => cmd.run(&cli.global).await,
        Commands::Sharing(cmd) => cmd.run(&cli.global).await,
        Commands::Keys(cmd) => cmd.run(&cli.global).await,
        Commands::Git(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("sky version {}", skyhook_cli::VERSION);
            Ok(())
        }
    }
}
