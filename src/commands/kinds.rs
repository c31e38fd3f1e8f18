// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kinds command - the symbol kind label table

use anyhow::Result;
use colored::Colorize;

use crate::cli::OutputFormat;
use fileoutline::outline::kind::kind_table;
use fileoutline::output::print_json;

/// Run the kinds command
pub fn run(format: OutputFormat, compact: bool) -> Result<()> {
    let table = kind_table();
    match format {
        OutputFormat::Json => print_json(&table, compact)?,
        OutputFormat::Text => {
            for entry in &table {
                println!("{:>2}  {}", entry.code, entry.label);
            }
            println!(" *  {}", "Unknown".dimmed());
        }
    }
    Ok(())
}
