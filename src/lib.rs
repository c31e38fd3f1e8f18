// SPDX-License-Identifier: MIT OR Apache-2.0

//! fileoutline - symbol outlines for the file you are editing
//!
//! Asks a language server (or a pre-computed dump) for a document's symbol
//! tree and exports it as an indented text outline, a JSON clipboard payload,
//! and a sidecar file next to the source.

pub mod config;
pub mod document;
pub mod errors;
pub mod notify;
pub mod orchestrator;
pub mod outline;
pub mod output;
pub mod sink;
pub mod source;
