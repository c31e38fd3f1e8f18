// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// fileoutline - Symbol outline of the file you are editing
///
/// Asks a language server for the document's symbols, prints the outline to
/// the log, copies it to the clipboard as JSON, and saves a sidecar file.
#[derive(Parser, Debug)]
#[command(name = "fileoutline")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Quickstart:\n  fileoutline print src/app.py\n  FILEOUTLINE_ACTIVE_FILE=src/app.py fileoutline print\n  fileoutline print src/app.py --symbols-from symbols.json --no-clipboard"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the outline of the active document and export it
    #[command(visible_aliases = ["p", "outline"])]
    Print {
        /// Document to outline (defaults to $FILEOUTLINE_ACTIVE_FILE)
        file: Option<String>,

        /// Language id of the document (detected from the extension otherwise)
        #[arg(short = 'l', long = "language-id")]
        language_id: Option<String>,

        /// Language server command line, e.g. "pyright-langserver --stdio"
        #[arg(short, long)]
        server: Option<String>,

        /// Read symbols from a JSON dump instead of a language server ("-" for stdin)
        #[arg(long = "symbols-from", value_name = "PATH")]
        symbols_from: Option<String>,

        /// Do not print the text outline to the log
        #[arg(long = "no-log")]
        no_log: bool,

        /// Do not copy the JSON outline to the clipboard
        #[arg(long = "no-clipboard")]
        no_clipboard: bool,

        /// Do not write the sidecar outline file
        #[arg(long = "no-sidecar")]
        no_sidecar: bool,
    },

    /// List symbol kind codes and their labels
    Kinds,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
