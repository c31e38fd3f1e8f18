// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Provides user-friendly error messages with actionable suggestions.

use std::fmt;

/// Error indicating no language server is configured or installed
#[derive(Debug)]
pub struct LanguageServerNotFoundError {
    pub language: String,
    pub command: Option<String>,
}

impl fmt::Display for LanguageServerNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.command {
            Some(command) => write!(
                f,
                "Language server '{}' for {} was not found on PATH\n\n\
                 Suggestions:\n\
                 - Install it, or point to another server: fileoutline print FILE --server \"<cmd> <args>\"\n\
                 - Configure one in .fileoutline.toml under [servers]\n\
                 - Feed pre-computed symbols: fileoutline print FILE --symbols-from symbols.json",
                command, self.language
            ),
            None => write!(
                f,
                "No language server configured for '{}'\n\n\
                 Suggestions:\n\
                 - Add one to .fileoutline.toml: [servers] {} = [\"<cmd>\", \"<args>\"]\n\
                 - Or pass it directly: fileoutline print FILE --server \"<cmd> <args>\"",
                self.language, self.language
            ),
        }
    }
}

impl std::error::Error for LanguageServerNotFoundError {}

/// Helper functions for creating helpful error messages
pub mod suggestions {
    use crate::document::ACTIVE_FILE_ENV;

    /// Get suggestion for a run without an active document
    pub fn no_active_document(requested: Option<&str>) -> String {
        match requested {
            Some(path) => format!(
                "'{}' is not a readable file.\n\n\
                 Pass the path of an existing source file:\n\
                 $ fileoutline print src/app.py",
                path
            ),
            None => format!(
                "No file given and {} is not set.\n\n\
                 Pass a file, or let your editor export the current buffer:\n\
                 $ fileoutline print src/app.py\n\
                 $ {}=src/app.py fileoutline print",
                ACTIVE_FILE_ENV, ACTIVE_FILE_ENV
            ),
        }
    }
}
