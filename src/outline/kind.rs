// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symbol kind codes and their outline labels

use serde::Serialize;
use std::fmt;

/// Symbol category as reported by the symbol source (host numbering, 0-based).
///
/// Codes outside the known table convert to [`OutlineKind::Unknown`] rather
/// than being folded into some neighbouring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
    Unknown,
}

impl OutlineKind {
    /// Every known kind in code order.
    pub const KNOWN: [OutlineKind; 26] = [
        OutlineKind::File,
        OutlineKind::Module,
        OutlineKind::Namespace,
        OutlineKind::Package,
        OutlineKind::Class,
        OutlineKind::Method,
        OutlineKind::Property,
        OutlineKind::Field,
        OutlineKind::Constructor,
        OutlineKind::Enum,
        OutlineKind::Interface,
        OutlineKind::Function,
        OutlineKind::Variable,
        OutlineKind::Constant,
        OutlineKind::String,
        OutlineKind::Number,
        OutlineKind::Boolean,
        OutlineKind::Array,
        OutlineKind::Object,
        OutlineKind::Key,
        OutlineKind::Null,
        OutlineKind::EnumMember,
        OutlineKind::Struct,
        OutlineKind::Event,
        OutlineKind::Operator,
        OutlineKind::TypeParameter,
    ];

    /// Total conversion from an integer kind code.
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::KNOWN.get(idx).copied())
            .unwrap_or(OutlineKind::Unknown)
    }

    /// Integer code of a known kind; `None` for `Unknown`.
    pub fn code(self) -> Option<i64> {
        Self::KNOWN
            .iter()
            .position(|kind| *kind == self)
            .map(|idx| idx as i64)
    }

    pub fn label(self) -> &'static str {
        match self {
            OutlineKind::File => "File",
            OutlineKind::Module => "Module",
            OutlineKind::Namespace => "Namespace",
            OutlineKind::Package => "Package",
            OutlineKind::Class => "Class",
            OutlineKind::Method => "Method",
            OutlineKind::Property => "Property",
            OutlineKind::Field => "Field",
            OutlineKind::Constructor => "Constructor",
            OutlineKind::Enum => "Enum",
            OutlineKind::Interface => "Interface",
            OutlineKind::Function => "Function",
            OutlineKind::Variable => "Variable",
            OutlineKind::Constant => "Constant",
            OutlineKind::String => "String",
            OutlineKind::Number => "Number",
            OutlineKind::Boolean => "Boolean",
            OutlineKind::Array => "Array",
            OutlineKind::Object => "Object",
            OutlineKind::Key => "Key",
            OutlineKind::Null => "Null",
            OutlineKind::EnumMember => "EnumMember",
            OutlineKind::Struct => "Struct",
            OutlineKind::Event => "Event",
            OutlineKind::Operator => "Operator",
            OutlineKind::TypeParameter => "TypeParameter",
            OutlineKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OutlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Row of the kind table for JSON output
#[derive(Debug, Serialize)]
pub struct KindEntry {
    pub code: i64,
    pub label: &'static str,
}

/// The full code -> label table in code order.
pub fn kind_table() -> Vec<KindEntry> {
    OutlineKind::KNOWN
        .iter()
        .enumerate()
        .map(|(code, kind)| KindEntry {
            code: code as i64,
            label: kind.label(),
        })
        .collect()
}
