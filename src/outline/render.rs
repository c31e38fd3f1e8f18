// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text and JSON rendering of a symbol forest

use anyhow::Result;
use std::fmt::Write as _;

use super::symbol::SymbolRecord;

/// First line of every text outline.
pub const OUTLINE_HEADER: &str = "File Outline:";

/// Render the indented text outline.
///
/// Pre-order, children directly after their parent in received order,
/// two spaces of indent per depth level. Lines are 1-based.
pub fn render_text(symbols: &[SymbolRecord]) -> String {
    let mut out = String::new();
    out.push_str(OUTLINE_HEADER);
    out.push('\n');

    // Reversed pushes keep pop order equal to received order.
    let mut stack: Vec<(&SymbolRecord, usize)> =
        symbols.iter().rev().map(|symbol| (symbol, 0)).collect();

    while let Some((symbol, depth)) = stack.pop() {
        let _ = writeln!(
            out,
            "{indent}- {name} ({kind}) [Lines {start}-{end}]",
            indent = "  ".repeat(depth),
            name = symbol.name,
            kind = symbol.outline_kind(),
            start = symbol.start_line() + 1,
            end = symbol.end_line() + 1,
        );
        stack.extend(symbol.children().iter().rev().map(|child| (child, depth + 1)));
    }

    out
}

/// Render the records as pretty JSON, every field included.
pub fn render_json(symbols: &[SymbolRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(symbols)?)
}
