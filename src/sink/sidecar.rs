// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sidecar outline file next to the source document

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Naming rule for the sidecar file
#[derive(Debug, Clone)]
pub struct SidecarRule {
    source_suffix: Option<Regex>,
    outline_suffix: String,
}

impl SidecarRule {
    /// `extensions` are the recognized source extensions (`py`, `.pyi`, ...).
    pub fn new(extensions: &[String], outline_suffix: impl Into<String>) -> Result<Self> {
        let alternatives: Vec<String> = extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .map(regex::escape)
            .collect();

        let source_suffix = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(r"\.(?:{})$", alternatives.join("|"));
            Some(Regex::new(&pattern).with_context(|| format!("Invalid suffix pattern {pattern}"))?)
        };

        Ok(Self {
            source_suffix,
            outline_suffix: outline_suffix.into(),
        })
    }

    /// Sidecar path for `source`.
    ///
    /// A recognized trailing extension is replaced once by the outline
    /// suffix; anything else gets the suffix appended to the full file name,
    /// so the source itself is never the target.
    pub fn path_for(&self, source: &Path) -> PathBuf {
        let Some(file_name) = source.file_name() else {
            let mut raw = source.as_os_str().to_owned();
            raw.push(&self.outline_suffix);
            return PathBuf::from(raw);
        };

        let new_name: OsString = match (file_name.to_str(), &self.source_suffix) {
            (Some(name), Some(re)) if re.is_match(name) => re
                .replace(name, NoExpand(&self.outline_suffix))
                .into_owned()
                .into(),
            _ => {
                let mut name = file_name.to_owned();
                name.push(&self.outline_suffix);
                name
            }
        };

        source.with_file_name(new_name)
    }
}

/// Write `text` to `path`, creating or overwriting it.
///
/// Goes through a temporary sibling and a rename, so overlapping runs never
/// leave a half-written outline behind; the last rename wins.
pub fn write_sidecar(path: &Path, text: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("outline"),
        std::process::id(),
        nonce
    );
    let tmp_path = parent.join(tmp_name);

    if let Err(err) = fs::write(&tmp_path, text.as_bytes()) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| {
            format!("failed to write temp outline file {}", tmp_path.display())
        });
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        // Some platforms refuse to rename over an existing file; only then is
        // the old outline removed before retrying.
        let retried = if err.kind() == ErrorKind::AlreadyExists && path.is_file() {
            fs::remove_file(path).and_then(|()| fs::rename(&tmp_path, path))
        } else {
            Err(err)
        };
        if let Err(err) = retried {
            let _ = fs::remove_file(&tmp_path);
            return Err(err)
                .with_context(|| format!("failed to write outline file {}", path.display()));
        }
    }

    Ok(())
}
