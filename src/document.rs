// SPDX-License-Identifier: MIT OR Apache-2.0

//! The active document an outline run operates on

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable editors use to hand over the current buffer's path.
pub const ACTIVE_FILE_ENV: &str = "FILEOUTLINE_ACTIVE_FILE";

/// Language id used when the extension is not recognized.
pub const PLAIN_TEXT: &str = "plaintext";

/// File the user is looking at, with its language id.
#[derive(Debug, Clone)]
pub struct ActiveDocument {
    pub path: PathBuf,
    pub language_id: String,
}

impl ActiveDocument {
    /// Resolve the active document from an explicit path or the environment.
    ///
    /// Returns `None` when no path is given, or the path is not a regular file.
    pub fn resolve(explicit: Option<&str>, language_override: Option<&str>) -> Option<Self> {
        let raw = explicit
            .map(str::to_string)
            .or_else(|| std::env::var(ACTIVE_FILE_ENV).ok())
            .filter(|raw| !raw.trim().is_empty())?;

        match Self::open(Path::new(&raw), language_override) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::debug!("no active document at {raw}: {err:#}");
                None
            }
        }
    }

    /// Open a document from disk, canonicalizing its path.
    pub fn open(path: &Path, language_override: Option<&str>) -> Result<Self> {
        let path = std::fs::canonicalize(path)
            .with_context(|| format!("Cannot resolve {}", path.display()))?;
        if !path.is_file() {
            anyhow::bail!("Not a regular file: {}", path.display());
        }

        let language_id = match language_override {
            Some(id) => id.to_lowercase(),
            None => path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(detect_language)
                .unwrap_or_else(|| PLAIN_TEXT.to_string()),
        };

        Ok(Self { path, language_id })
    }

    pub fn read_text(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }

    /// `file://` URI of the document.
    pub fn uri(&self) -> Result<url::Url> {
        url::Url::from_file_path(&self.path)
            .map_err(|_| anyhow::anyhow!("Cannot build file URI for {}", self.path.display()))
    }
}

/// Map a file extension to a language id.
pub fn detect_language(ext: &str) -> Option<String> {
    match ext.to_lowercase().as_str() {
        "rs" => Some("rust".into()),
        "ts" | "tsx" => Some("typescript".into()),
        "js" | "jsx" => Some("javascript".into()),
        "py" | "pyi" => Some("python".into()),
        "go" => Some("go".into()),
        "java" => Some("java".into()),
        "c" | "h" => Some("c".into()),
        "cpp" | "cc" | "hpp" => Some("cpp".into()),
        "cs" => Some("csharp".into()),
        "rb" => Some("ruby".into()),
        "php" => Some("php".into()),
        "swift" => Some("swift".into()),
        "kt" | "kts" => Some("kotlin".into()),
        "scala" => Some("scala".into()),
        "lua" => Some("lua".into()),
        _ => None,
    }
}

/// Human-facing name for a language id (`python` -> `Python`).
pub fn display_language(language_id: &str) -> String {
    let mut chars = language_id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
