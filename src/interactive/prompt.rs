//
//  skyhook-cli
//  interactive/prompt.rs
//

//! Prompt helpers used by login and the destructive-confirmation flows.
//!
//! All prompts block until the user answers; commands honor `--no-prompt` by
//! not calling these at all.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts for a non-empty line of text.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Prompts for a secret without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let input = Password::new().with_prompt(message).interact()?;
    Ok(input)
}

/// Asks a yes/no question, defaulting to "no".
///
/// The default is deliberately the non-destructive answer: every caller uses
/// this ahead of an action that would discard user state.
pub fn prompt_confirm(message: &str) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(answer)
}
