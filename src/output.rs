// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON output helpers shared by commands

use anyhow::Result;
use serde::Serialize;

/// Serialize `payload` as pretty or compact JSON.
pub fn to_json_string<T: Serialize + ?Sized>(payload: &T, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(payload)?
    } else {
        serde_json::to_string_pretty(payload)?
    };
    Ok(rendered)
}

/// Print `payload` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(payload: &T, compact: bool) -> Result<()> {
    println!("{}", to_json_string(payload, compact)?);
    Ok(())
}
