//
//  skyhook-cli
//  interactive/mod.rs
//

//! Interactive terminal prompts, wrapping `dialoguer`.

mod prompt;

pub use prompt::*;
