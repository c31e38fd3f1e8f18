// SPDX-License-Identifier: MIT OR Apache-2.0

//! Print command - outline the active document and export it

use anyhow::Result;
use std::process::ExitCode;

use crate::cli::OutputFormat;
use fileoutline::config::Config;
use fileoutline::document::ActiveDocument;
use fileoutline::errors::suggestions;
use fileoutline::notify::{ConsoleNotifier, Notifier, SilentNotifier};
use fileoutline::orchestrator::{Orchestrator, RunOutcome, Sinks};
use fileoutline::output::print_json;
use fileoutline::sink::{Clipboard, OutlineLog, SidecarRule, SystemClipboard};
use fileoutline::source::dump::DumpInput;
use fileoutline::source::{JsonDumpSource, LspSymbolSource, SymbolSource};

/// Arguments of the print command
#[derive(Debug)]
pub struct PrintArgs {
    pub file: Option<String>,
    pub language_id: Option<String>,
    pub server: Option<String>,
    pub symbols_from: Option<String>,
    pub no_log: bool,
    pub no_clipboard: bool,
    pub no_sidecar: bool,
}

/// Run the print command
pub async fn run(
    args: PrintArgs,
    config: &Config,
    format: OutputFormat,
    compact: bool,
) -> Result<ExitCode> {
    let document = ActiveDocument::resolve(args.file.as_deref(), args.language_id.as_deref());
    let source = select_source(&args, config, document.as_ref());

    let notifier: Box<dyn Notifier> = match format {
        OutputFormat::Text => Box::new(ConsoleNotifier),
        OutputFormat::Json => Box::new(SilentNotifier),
    };

    let mut log = Config::merge_enabled(config.log, args.no_log).then(OutlineLog::stderr);
    let mut clipboard =
        Config::merge_enabled(config.clipboard, args.no_clipboard).then(SystemClipboard::default);
    let sidecar_rule = if Config::merge_enabled(config.sidecar, args.no_sidecar) {
        Some(SidecarRule::new(
            &config.source_extensions(),
            config.outline_suffix(),
        )?)
    } else {
        None
    };

    let sinks = Sinks {
        log: log.as_mut(),
        clipboard: clipboard.as_mut().map(|c| c as &mut dyn Clipboard),
        sidecar: sidecar_rule.as_ref(),
    };

    let report = Orchestrator::new(source.as_ref(), notifier.as_ref())
        .expect_language(config.expected_language())
        .run(document.as_ref(), sinks)
        .await;

    match format {
        OutputFormat::Json => print_json(&report, compact)?,
        OutputFormat::Text => {
            if report.outcome == RunOutcome::NoActiveDocument {
                eprintln!("\n{}", suggestions::no_active_document(args.file.as_deref()));
            }
        }
    }

    Ok(if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn select_source(
    args: &PrintArgs,
    config: &Config,
    document: Option<&ActiveDocument>,
) -> Box<dyn SymbolSource> {
    if let Some(raw) = &args.symbols_from {
        return Box::new(JsonDumpSource::new(DumpInput::parse(raw)));
    }

    let command = match &args.server {
        Some(line) => line.split_whitespace().map(str::to_string).collect(),
        None => document
            .and_then(|doc| config.server_command(&doc.language_id))
            .unwrap_or_default(),
    };
    Box::new(LspSymbolSource::new(command).with_timeout(config.request_timeout()))
}
