// SPDX-License-Identifier: MIT OR Apache-2.0

//! fileoutline - Symbol outline of the file you are editing
//!
//! Queries a language server for document symbols and exports the outline
//! to the log, the clipboard, and a sidecar file.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use commands::print::PrintArgs;
use fileoutline::config::{Config, ConfigOutputFormat};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean for piping.
    let default_filter = match cli.verbose {
        0 => "fileoutline=warn",
        1 => "fileoutline=info",
        2 => "fileoutline=debug",
        _ => "fileoutline=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let format = cli.format.unwrap_or(match config.output_format() {
        Some(ConfigOutputFormat::Json) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    match cli.command {
        Commands::Print {
            file,
            language_id,
            server,
            symbols_from,
            no_log,
            no_clipboard,
            no_sidecar,
        } => {
            let args = PrintArgs {
                file,
                language_id,
                server,
                symbols_from,
                no_log,
                no_clipboard,
                no_sidecar,
            };
            commands::print::run(args, &config, format, cli.compact).await
        }
        Commands::Kinds => {
            commands::kinds::run(format, cli.compact)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "fileoutline",
                &mut std::io::stdout(),
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
