// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for fileoutline
//!
//! Loads configuration from .fileoutline.toml in current directory or ~/.config/fileoutline/config.toml

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from .fileoutline.toml or ~/.config/fileoutline/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language the outline is tuned for; other languages get a warning
    pub expected_language: Option<String>,
    /// Extensions replaced by the outline suffix when naming the sidecar
    pub source_extensions: Option<Vec<String>>,
    /// Suffix of the sidecar file
    pub outline_suffix: Option<String>,
    /// Write the JSON outline to the clipboard
    pub clipboard: Option<bool>,
    /// Write the sidecar file
    pub sidecar: Option<bool>,
    /// Print the text outline to the log
    pub log: Option<bool>,
    /// Give up on the language server after this many seconds
    pub request_timeout_secs: Option<u64>,
    /// Default output format (text or json)
    pub default_format: Option<String>,
    /// Language server command lines keyed by language id
    pub servers: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .fileoutline.toml in current directory
    /// 2. ~/.config/fileoutline/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(&PathBuf::from(".fileoutline.toml")) {
            return config;
        }

        // Per-user fallback, shared by every project
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("fileoutline").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!("loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(ConfigOutputFormat::Json),
            "text" => Some(ConfigOutputFormat::Text),
            _ => None,
        })
    }

    pub fn expected_language(&self) -> String {
        self.expected_language
            .clone()
            .unwrap_or_else(|| "python".to_string())
    }

    pub fn source_extensions(&self) -> Vec<String> {
        self.source_extensions
            .clone()
            .unwrap_or_else(|| vec!["py".to_string()])
    }

    pub fn outline_suffix(&self) -> String {
        self.outline_suffix
            .clone()
            .unwrap_or_else(|| "_outline.txt".to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Merge a CLI `--no-*` switch with config (CLI wins when it disables)
    pub fn merge_enabled(config_value: Option<bool>, cli_disabled: bool) -> bool {
        !cli_disabled && config_value.unwrap_or(true)
    }

    /// Server command line for a language: config entry, else built-in default.
    pub fn server_command(&self, language_id: &str) -> Option<Vec<String>> {
        if let Some(command) = self.servers.get(language_id) {
            return (!command.is_empty()).then(|| command.clone());
        }
        default_server_command(language_id)
    }
}

fn default_server_command(language_id: &str) -> Option<Vec<String>> {
    let argv: &[&str] = match language_id {
        "python" => &["pylsp"],
        "rust" => &["rust-analyzer"],
        "typescript" | "javascript" => &["typescript-language-server", "--stdio"],
        "go" => &["gopls"],
        "c" | "cpp" => &["clangd"],
        _ => return None,
    };
    Some(argv.iter().map(|arg| arg.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_python_workflow() {
        let config = Config::default();
        assert_eq!(config.expected_language(), "python");
        assert_eq!(config.source_extensions(), vec!["py".to_string()]);
        assert_eq!(config.outline_suffix(), "_outline.txt");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.output_format(), None);
        assert_eq!(config.server_command("python"), Some(vec!["pylsp".to_string()]));
        assert_eq!(config.server_command("cobol"), None);
    }

    #[test]
    fn parses_toml_with_server_overrides() {
        let config: Config = toml::from_str(
            r#"
expected_language = "rust"
source_extensions = ["rs"]
outline_suffix = ".outline"
clipboard = false
request_timeout_secs = 5
default_format = "JSON"

[servers]
python = ["pyright-langserver", "--stdio"]
cobol = []
"#,
        )
        .expect("parse config");

        assert_eq!(config.expected_language(), "rust");
        assert_eq!(config.source_extensions(), vec!["rs".to_string()]);
        assert_eq!(config.outline_suffix(), ".outline");
        assert_eq!(config.clipboard, Some(false));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.output_format(), Some(ConfigOutputFormat::Json));
        assert_eq!(
            config.server_command("python"),
            Some(vec!["pyright-langserver".to_string(), "--stdio".to_string()])
        );
        assert_eq!(config.server_command("cobol"), None);
        assert_eq!(config.server_command("go"), Some(vec!["gopls".to_string()]));
    }

    #[test]
    fn cli_switch_disables_regardless_of_config() {
        assert!(Config::merge_enabled(None, false));
        assert!(Config::merge_enabled(Some(true), false));
        assert!(!Config::merge_enabled(Some(false), false));
        assert!(!Config::merge_enabled(Some(true), true));
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), None);
    }
}
