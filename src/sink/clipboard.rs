// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clipboard sink

use anyhow::{Context, Result};

/// Something that can hold text for pasting elsewhere
pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard
#[derive(Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Clipboard is not available")?;
        clipboard
            .set_text(text)
            .context("Failed to write to clipboard")?;
        Ok(())
    }
}

/// In-memory clipboard; keeps the last text written
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub writes: usize,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_last_writer_wins() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.set_text("first").expect("write");
        clipboard.set_text("second").expect("write");
        assert_eq!(clipboard.contents.as_deref(), Some("second"));
        assert_eq!(clipboard.writes, 2);
    }
}
