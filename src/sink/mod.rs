// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sink module - where a finished outline goes

pub mod clipboard;
pub mod sidecar;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use sidecar::{write_sidecar, SidecarRule};

/// The three outputs of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Log,
    Clipboard,
    Sidecar,
}

/// Result of one sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SinkStatus {
    Written { detail: String },
    Failed { error: String },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkOutcome {
    pub sink: SinkKind,
    #[serde(flatten)]
    pub status: SinkStatus,
}

impl SinkOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, SinkStatus::Failed { .. })
    }
}

/// Diagnostic log the text outline is printed to
pub struct OutlineLog {
    writer: Box<dyn Write + Send>,
}

impl OutlineLog {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    pub fn write_outline(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .context("Failed to write outline to log")?;
        self.writer.flush().context("Failed to flush log")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_receives_outline_verbatim() {
        let buf = SharedBuf::default();
        let mut log = OutlineLog::new(Box::new(buf.clone()));
        log.write_outline("File Outline:\n").expect("write");
        assert_eq!(buf.0.lock().expect("lock").as_slice(), b"File Outline:\n");
    }

    #[test]
    fn outcome_serializes_flat() {
        let outcome = SinkOutcome {
            sink: SinkKind::Sidecar,
            status: SinkStatus::Failed {
                error: "disk full".into(),
            },
        };
        let json = serde_json::to_value(&outcome).expect("json");
        assert_eq!(json["sink"], "sidecar");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "disk full");
        assert!(outcome.is_failure());
    }
}
