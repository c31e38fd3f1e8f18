// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outline module - symbol records, kind labels, and rendering

pub mod kind;
pub mod render;
pub mod symbol;

pub use kind::OutlineKind;
pub use render::{render_json, render_text, OUTLINE_HEADER};
pub use symbol::{count_symbols, LineRange, Position, SymbolRecord};
