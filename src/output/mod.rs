//
//  skyhook-cli
//  output/mod.rs
//

//! # Output Formatting
//!
//! Listing commands render either a human-readable table (the default) or
//! machine-readable JSON (`--json`). Tables use `comfy_table`; JSON goes
//! through `serde_json` so scripted consumers get stable structure.

use anyhow::Result;
use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use serde::Serialize;

/// Serializes a value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Renders rows under a header as a bordered table.
pub fn print_table(header: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY).set_header(header);
    for row in rows {
        table.add_row(row);
    }
    println!("{table}");
}
