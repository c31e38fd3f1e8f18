// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symbol records as handed over by a symbol source

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::kind::OutlineKind;

/// Zero-based position inside a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub line: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Start/end span of a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: Position,
    pub end: Position,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One node of a document's symbol tree.
///
/// Fields the outline does not use (`detail`, `selectionRange`, `tags`, ...)
/// are kept in `extra` so re-serializing yields what the source produced.
/// `children`: None = key absent, Some(None) = explicit `null`,
/// Some(Some(list)) = child records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    pub kind: i64,
    pub range: LineRange,
    #[serde(
        default,
        deserialize_with = "present_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub children: Option<Option<Vec<SymbolRecord>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Only called when the key exists, so `null` lands in `Some(None)`.
fn present_key<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Position {
    pub fn new(line: u64, character: u64) -> Self {
        Self {
            line,
            character: Some(character),
            extra: Map::new(),
        }
    }
}

impl SymbolRecord {
    /// Build a record spanning whole lines `start_line..=end_line`.
    pub fn new(name: impl Into<String>, kind: i64, start_line: u64, end_line: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            range: LineRange {
                start: Position::new(start_line, 0),
                end: Position::new(end_line, 0),
                extra: Map::new(),
            },
            children: Some(Some(Vec::new())),
            extra: Map::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SymbolRecord>) -> Self {
        self.children = Some(Some(children));
        self
    }

    pub fn outline_kind(&self) -> OutlineKind {
        OutlineKind::from_code(self.kind)
    }

    pub fn children(&self) -> &[SymbolRecord] {
        self.children.as_ref().and_then(Option::as_deref).unwrap_or(&[])
    }

    pub fn start_line(&self) -> u64 {
        self.range.start.line
    }

    pub fn end_line(&self) -> u64 {
        self.range.end.line
    }
}

/// Total number of nodes across a forest.
pub fn count_symbols(symbols: &[SymbolRecord]) -> usize {
    let mut stack: Vec<&SymbolRecord> = symbols.iter().collect();
    let mut count = 0;
    while let Some(symbol) = stack.pop() {
        count += 1;
        stack.extend(symbol.children());
    }
    count
}
