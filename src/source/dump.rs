// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pre-computed symbols read from a JSON file or stdin

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::document::ActiveDocument;
use crate::outline::SymbolRecord;

use super::SymbolSource;

/// Where the dump is read from
#[derive(Debug, Clone)]
pub enum DumpInput {
    File(PathBuf),
    Stdin,
}

impl DumpInput {
    /// `-` selects stdin, anything else is a path.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            DumpInput::Stdin
        } else {
            DumpInput::File(PathBuf::from(raw))
        }
    }
}

/// Symbol source backed by a JSON dump (`null` or an array of records)
pub struct JsonDumpSource {
    input: DumpInput,
}

impl JsonDumpSource {
    pub fn new(input: DumpInput) -> Self {
        Self { input }
    }
}

/// Parse a dump; `null` is absent, an array is the forest.
pub fn parse_dump(content: &str) -> Result<Option<Vec<SymbolRecord>>> {
    serde_json::from_str(content).context("Symbol dump must be null or an array of symbols")
}

#[async_trait]
impl SymbolSource for JsonDumpSource {
    fn describe(&self) -> String {
        match &self.input {
            DumpInput::File(path) => format!("symbol dump {}", path.display()),
            DumpInput::Stdin => "symbol dump on stdin".to_string(),
        }
    }

    async fn document_symbols(
        &self,
        document: &ActiveDocument,
    ) -> Result<Option<Vec<SymbolRecord>>> {
        tracing::debug!("reading symbols for {}", document.path.display());
        let content = match &self.input {
            DumpInput::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read symbol dump {}", path.display()))?,
            DumpInput::Stdin => {
                let mut content = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut content)
                    .await
                    .context("Failed to read symbol dump from stdin")?;
                content
            }
        };
        parse_dump(&content)
    }
}
