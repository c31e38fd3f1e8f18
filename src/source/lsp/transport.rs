// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base protocol framing: `Content-Length` headers around JSON bodies

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::LspError;

/// Upper bound on a single message body.
const MAX_MESSAGE_BYTES: usize = 64 * 1024 * 1024;

/// Write one framed JSON-RPC message.
pub async fn write_message<W>(writer: &mut W, message: &Value) -> Result<(), LspError>
where
    W: AsyncWrite + Unpin,
{
    let body = serde_json::to_vec(message)?;
    let header = format!("Content-Length: {}\r\n\r\n", body.len());
    writer.write_all(header.as_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one framed JSON-RPC message.
///
/// Returns `Ok(None)` on a clean end of stream between messages.
pub async fn read_message<R>(reader: &mut R) -> Result<Option<Value>, LspError>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;
    let mut saw_header = false;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            if saw_header {
                return Err(LspError::Framing("stream ended inside headers".into()));
            }
            return Ok(None);
        }

        let header = line.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            if saw_header {
                break;
            }
            continue;
        }
        saw_header = true;

        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| LspError::Framing(format!("malformed header line: {header:?}")))?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            let len = value
                .trim()
                .parse::<usize>()
                .map_err(|_| LspError::Framing(format!("bad Content-Length: {}", value.trim())))?;
            content_length = Some(len);
        }
    }

    let len = content_length
        .ok_or_else(|| LspError::Framing("missing Content-Length header".into()))?;
    if len > MAX_MESSAGE_BYTES {
        return Err(LspError::Framing(format!(
            "message of {len} bytes exceeds limit of {MAX_MESSAGE_BYTES}"
        )));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    Ok(Some(serde_json::from_slice(&body)?))
}
