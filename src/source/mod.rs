// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symbol sources - where document symbols come from

pub mod dump;
pub mod lsp;

use anyhow::Result;
use async_trait::async_trait;

use crate::document::ActiveDocument;
use crate::outline::SymbolRecord;

pub use dump::JsonDumpSource;
pub use lsp::LspSymbolSource;

/// Something that can resolve a document's symbol tree.
///
/// `Ok(None)` means the provider had nothing to say about the document.
#[async_trait]
pub trait SymbolSource: Send + Sync {
    /// Short description for logs
    fn describe(&self) -> String;

    async fn document_symbols(&self, document: &ActiveDocument)
        -> Result<Option<Vec<SymbolRecord>>>;
}
