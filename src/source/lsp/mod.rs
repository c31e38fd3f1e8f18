// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language server symbol source (stdio JSON-RPC).

pub mod transport;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::process::Command;

use crate::document::ActiveDocument;
use crate::errors::LanguageServerNotFoundError;
use crate::outline::SymbolRecord;

use super::SymbolSource;
use transport::{read_message, write_message};

/// How long a server gets to exit after `exit` before it is killed.
const EXIT_GRACE: Duration = Duration::from_secs(2);

/// Failures talking to a language server
#[derive(Debug, Error)]
pub enum LspError {
    #[error("language server I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON from language server: {0}")]
    Json(#[from] serde_json::Error),
    #[error("language server framing error: {0}")]
    Framing(String),
    #[error("language server closed the connection")]
    Closed,
    #[error("language server returned error {code} for {method}: {message}")]
    Server {
        method: String,
        code: i64,
        message: String,
    },
    #[error("unexpected {method} result: {found}")]
    UnexpectedResult { method: String, found: String },
    #[error("language server did not answer within {0:?}")]
    Timeout(Duration),
}

/// Document handed to the server with `textDocument/didOpen`
#[derive(Debug, Clone, Copy)]
pub struct OpenDocument<'a> {
    pub uri: &'a str,
    pub root_uri: Option<&'a str>,
    pub language_id: &'a str,
    pub text: &'a str,
}

/// Minimal LSP client: requests, notifications, and replies to server requests.
pub struct LspClient<R, W> {
    reader: R,
    writer: W,
    next_id: i64,
}

impl<R, W> LspClient<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            next_id: 1,
        }
    }

    /// Send a request and wait for its response.
    ///
    /// Server notifications are skipped and server requests get a `null`
    /// reply while waiting.
    pub async fn request(&mut self, method: &str, params: Value) -> Result<Value, LspError> {
        let id = self.next_id;
        self.next_id += 1;

        tracing::debug!(id, method, "lsp request");
        write_message(
            &mut self.writer,
            &json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}),
        )
        .await?;

        loop {
            let message = read_message(&mut self.reader)
                .await?
                .ok_or(LspError::Closed)?;

            if let Some(server_method) = message.get("method").and_then(Value::as_str) {
                match message.get("id") {
                    Some(request_id) => {
                        let request_id = request_id.clone();
                        self.reply_to_server(request_id, server_method, &message)
                            .await?;
                    }
                    None => tracing::trace!(method = server_method, "lsp notification ignored"),
                }
                continue;
            }

            if message.get("id").and_then(Value::as_i64) != Some(id) {
                tracing::debug!("ignoring response for another request: {message}");
                continue;
            }

            if let Some(error) = message.get("error") {
                return Err(LspError::Server {
                    method: method.to_string(),
                    code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
                    message: error
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string(),
                });
            }

            return Ok(message.get("result").cloned().unwrap_or(Value::Null));
        }
    }

    pub async fn notify(&mut self, method: &str, params: Value) -> Result<(), LspError> {
        tracing::debug!(method, "lsp notification");
        write_message(
            &mut self.writer,
            &json!({"jsonrpc": "2.0", "method": method, "params": params}),
        )
        .await
    }

    async fn reply_to_server(
        &mut self,
        id: Value,
        method: &str,
        message: &Value,
    ) -> Result<(), LspError> {
        let result = match method {
            // One (empty) setting per requested item.
            "workspace/configuration" => {
                let items = message
                    .pointer("/params/items")
                    .and_then(Value::as_array)
                    .map(Vec::len)
                    .unwrap_or(0);
                Value::Array(vec![Value::Null; items])
            }
            _ => Value::Null,
        };
        tracing::trace!(method, "answering server request");
        write_message(
            &mut self.writer,
            &json!({"jsonrpc": "2.0", "id": id, "result": result}),
        )
        .await
    }

    /// Full exchange: initialize, open the document, ask for its symbols, shut down.
    pub async fn outline_session(
        &mut self,
        document: &OpenDocument<'_>,
    ) -> Result<Option<Vec<SymbolRecord>>, LspError> {
        let workspace_folders = match document.root_uri {
            Some(root) => json!([{"uri": root, "name": "workspace"}]),
            None => Value::Null,
        };
        self.request(
            "initialize",
            json!({
                "processId": std::process::id(),
                "clientInfo": {"name": "fileoutline", "version": env!("CARGO_PKG_VERSION")},
                "rootUri": document.root_uri,
                "workspaceFolders": workspace_folders,
                "capabilities": {
                    "workspace": {"configuration": true},
                    "textDocument": {
                        "documentSymbol": {
                            "hierarchicalDocumentSymbolSupport": true,
                            "symbolKind": {"valueSet": (1..=26).collect::<Vec<i64>>()}
                        }
                    }
                }
            }),
        )
        .await?;
        self.notify("initialized", json!({})).await?;

        self.notify(
            "textDocument/didOpen",
            json!({
                "textDocument": {
                    "uri": document.uri,
                    "languageId": document.language_id,
                    "version": 1,
                    "text": document.text
                }
            }),
        )
        .await?;

        let result = self
            .request(
                "textDocument/documentSymbol",
                json!({"textDocument": {"uri": document.uri}}),
            )
            .await?;
        let symbols = normalize_symbols(result)?;

        // Symbols are in hand; a server that fumbles shutdown still counts.
        if let Err(err) = self.request("shutdown", Value::Null).await {
            tracing::debug!("language server shutdown failed: {err}");
        }
        if let Err(err) = self.notify("exit", Value::Null).await {
            tracing::debug!("language server exit notification failed: {err}");
        }

        Ok(symbols)
    }
}

/// Convert a `textDocument/documentSymbol` result into host records.
///
/// `null` means absent. Flat `SymbolInformation` entries take their range from
/// `location.range`. Wire kinds (1-based) become host codes (0-based).
pub fn normalize_symbols(result: Value) -> Result<Option<Vec<SymbolRecord>>, LspError> {
    let items = match result {
        Value::Null => return Ok(None),
        Value::Array(items) => items,
        other => {
            return Err(LspError::UnexpectedResult {
                method: "textDocument/documentSymbol".to_string(),
                found: other.to_string(),
            })
        }
    };

    items
        .into_iter()
        .map(|mut item| {
            if let Value::Object(map) = &mut item {
                if !map.contains_key("range") {
                    if let Some(range) = map.get("location").and_then(|loc| loc.get("range")) {
                        let range = range.clone();
                        map.insert("range".to_string(), range);
                    }
                }
            }
            let mut record: SymbolRecord = serde_json::from_value(item)?;
            shift_wire_kinds(&mut record);
            Ok(record)
        })
        .collect::<Result<Vec<_>, LspError>>()
        .map(Some)
}

fn shift_wire_kinds(root: &mut SymbolRecord) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        node.kind = wire_kind_to_host(node.kind);
        if let Some(Some(children)) = node.children.as_mut() {
            stack.extend(children.iter_mut());
        }
    }
}

/// LSP numbers kinds from 1 (`File`); hosts number them from 0.
pub fn wire_kind_to_host(kind: i64) -> i64 {
    if kind >= 1 {
        kind - 1
    } else {
        -1
    }
}

/// Spawns a language server per request and asks it for document symbols
pub struct LspSymbolSource {
    command: Vec<String>,
    timeout: Option<Duration>,
}

impl LspSymbolSource {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SymbolSource for LspSymbolSource {
    fn describe(&self) -> String {
        format!("language server `{}`", self.command.join(" "))
    }

    async fn document_symbols(
        &self,
        document: &ActiveDocument,
    ) -> Result<Option<Vec<SymbolRecord>>> {
        let (program, args) = self.command.split_first().ok_or_else(|| {
            anyhow::Error::new(LanguageServerNotFoundError {
                language: document.language_id.clone(),
                command: None,
            })
        })?;
        let program_path = which::which(program).map_err(|_| {
            anyhow::Error::new(LanguageServerNotFoundError {
                language: document.language_id.clone(),
                command: Some(program.clone()),
            })
        })?;

        let text = document.read_text()?;
        let uri = document.uri()?;
        let root_uri = document
            .path
            .parent()
            .and_then(|dir| url::Url::from_directory_path(dir).ok());

        tracing::info!("starting {}", program_path.display());
        let mut child = Command::new(&program_path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start language server {}", program))?;

        let stdin = child
            .stdin
            .take()
            .context("Failed to get stdin of language server")?;
        let stdout = child
            .stdout
            .take()
            .context("Failed to get stdout of language server")?;

        let open = OpenDocument {
            uri: uri.as_str(),
            root_uri: root_uri.as_ref().map(url::Url::as_str),
            language_id: &document.language_id,
            text: &text,
        };

        let mut client = LspClient::new(BufReader::new(stdout), stdin);
        let session = client.outline_session(&open);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, session)
                .await
                .unwrap_or(Err(LspError::Timeout(limit))),
            None => session.await,
        };
        drop(client);

        if tokio::time::timeout(EXIT_GRACE, child.wait()).await.is_err() {
            tracing::debug!("language server did not exit, killing it");
            let _ = child.kill().await;
        }

        Ok(result?)
    }
}
