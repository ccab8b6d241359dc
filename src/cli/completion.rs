//
//  skyhook-cli
//  cli/completion.rs
//

//! Shell completion script generation

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

/// Generate a shell completion script on stdout
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Shell to generate the script for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, crate::APP_NAME, &mut std::io::stdout());
        Ok(())
    }
}
