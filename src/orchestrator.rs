// SPDX-License-Identifier: MIT OR Apache-2.0

//! One outline run: preconditions, symbol lookup, and the three sinks

use serde::Serialize;

use crate::document::{display_language, ActiveDocument};
use crate::notify::{Notice, Notifier};
use crate::outline::{count_symbols, render_json, render_text, SymbolRecord};
use crate::sink::{
    write_sidecar, Clipboard, OutlineLog, SidecarRule, SinkKind, SinkOutcome, SinkStatus,
};
use crate::source::SymbolSource;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    NoActiveDocument,
    NoSymbols,
    SourceFailed,
}

/// Everything a run did, for printing or inspection
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
    pub symbol_count: usize,
    pub notices: Vec<Notice>,
    pub sinks: Vec<SinkOutcome>,
}

impl RunReport {
    fn new(outcome: RunOutcome) -> Self {
        Self {
            outcome,
            document: None,
            language_id: None,
            symbol_count: 0,
            notices: Vec::new(),
            sinks: Vec::new(),
        }
    }

    /// Completed with every enabled sink written, or nothing to write.
    pub fn succeeded(&self) -> bool {
        match self.outcome {
            RunOutcome::Completed => !self.sinks.iter().any(SinkOutcome::is_failure),
            RunOutcome::NoSymbols => true,
            RunOutcome::NoActiveDocument | RunOutcome::SourceFailed => false,
        }
    }
}

/// Sinks for one run; `None` disables a sink
#[derive(Default)]
pub struct Sinks<'a> {
    pub log: Option<&'a mut OutlineLog>,
    pub clipboard: Option<&'a mut dyn Clipboard>,
    pub sidecar: Option<&'a SidecarRule>,
}

/// Coordinates a run with explicitly supplied collaborators
pub struct Orchestrator<'a> {
    source: &'a dyn SymbolSource,
    notifier: &'a dyn Notifier,
    expected_language: Option<String>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(source: &'a dyn SymbolSource, notifier: &'a dyn Notifier) -> Self {
        Self {
            source,
            notifier,
            expected_language: None,
        }
    }

    /// Warn (but continue) when the document is in another language.
    pub fn expect_language(mut self, language_id: impl Into<String>) -> Self {
        self.expected_language = Some(language_id.into());
        self
    }

    pub async fn run(&self, document: Option<&ActiveDocument>, sinks: Sinks<'_>) -> RunReport {
        let Some(document) = document else {
            let mut report = RunReport::new(RunOutcome::NoActiveDocument);
            self.emit(&mut report, Notice::error("No active editor!"));
            return report;
        };

        let mut report = RunReport::new(RunOutcome::Completed);
        report.document = Some(document.path.display().to_string());
        report.language_id = Some(document.language_id.clone());

        if let Some(expected) = &self.expected_language {
            if !document.language_id.eq_ignore_ascii_case(expected) {
                self.emit(
                    &mut report,
                    Notice::warning(format!(
                        "This is optimized for {} files.",
                        display_language(expected)
                    )),
                );
            }
        }

        tracing::debug!(
            "requesting symbols for {} from {}",
            document.path.display(),
            self.source.describe()
        );
        let symbols = match self.source.document_symbols(document).await {
            Ok(Some(symbols)) if !symbols.is_empty() => symbols,
            Ok(_) => {
                report.outcome = RunOutcome::NoSymbols;
                self.emit(&mut report, Notice::info("No symbols found in this file."));
                return report;
            }
            Err(err) => {
                report.outcome = RunOutcome::SourceFailed;
                self.emit(
                    &mut report,
                    Notice::error(format!("Failed to get symbols: {err:#}")),
                );
                return report;
            }
        };

        report.symbol_count = count_symbols(&symbols);
        tracing::info!("{} symbols received", report.symbol_count);

        self.write_sinks(&mut report, document, &symbols, sinks);
        report
    }

    /// Each sink runs regardless of how the others went.
    fn write_sinks(
        &self,
        report: &mut RunReport,
        document: &ActiveDocument,
        symbols: &[SymbolRecord],
        sinks: Sinks<'_>,
    ) {
        let text = render_text(symbols);

        let log_status = match sinks.log {
            None => SinkStatus::Skipped,
            Some(log) => match log.write_outline(&text) {
                Ok(()) => {
                    self.emit(report, Notice::info("Outline printed to log."));
                    SinkStatus::Written {
                        detail: "text outline".to_string(),
                    }
                }
                Err(err) => self.fail(report, format!("Failed to print outline to log: {err:#}")),
            },
        };
        report.sinks.push(SinkOutcome {
            sink: SinkKind::Log,
            status: log_status,
        });

        let clipboard_status = match sinks.clipboard {
            None => SinkStatus::Skipped,
            Some(clipboard) => match render_json(symbols).and_then(|json| clipboard.set_text(&json))
            {
                Ok(()) => {
                    self.emit(
                        report,
                        Notice::info("JSON outline copied to clipboard for LLM summarization."),
                    );
                    SinkStatus::Written {
                        detail: "json outline".to_string(),
                    }
                }
                Err(err) => self.fail(
                    report,
                    format!("Failed to copy JSON outline to clipboard: {err:#}"),
                ),
            },
        };
        report.sinks.push(SinkOutcome {
            sink: SinkKind::Clipboard,
            status: clipboard_status,
        });

        let sidecar_status = match sinks.sidecar {
            None => SinkStatus::Skipped,
            Some(rule) => {
                let path = rule.path_for(&document.path);
                match write_sidecar(&path, &text) {
                    Ok(()) => {
                        self.emit(
                            report,
                            Notice::info(format!("Outline saved to {}", path.display())),
                        );
                        SinkStatus::Written {
                            detail: path.display().to_string(),
                        }
                    }
                    Err(err) => self.fail(
                        report,
                        format!("Failed to save outline to {}: {err:#}", path.display()),
                    ),
                }
            }
        };
        report.sinks.push(SinkOutcome {
            sink: SinkKind::Sidecar,
            status: sidecar_status,
        });
    }

    fn fail(&self, report: &mut RunReport, message: String) -> SinkStatus {
        tracing::warn!("{message}");
        self.emit(report, Notice::error(message.clone()));
        SinkStatus::Failed { error: message }
    }

    fn emit(&self, report: &mut RunReport, notice: Notice) {
        self.notifier.notify(&notice);
        report.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NoticeLevel, RecordingNotifier};
    use crate::sink::MemoryClipboard;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::io::Write;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    enum Reply {
        Symbols(Option<Vec<SymbolRecord>>),
        Fail(&'static str),
    }

    struct FakeSource {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SymbolSource for FakeSource {
        fn describe(&self) -> String {
            "fake".to_string()
        }

        async fn document_symbols(
            &self,
            _document: &ActiveDocument,
        ) -> Result<Option<Vec<SymbolRecord>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Symbols(symbols) => Ok(symbols.clone()),
                Reply::Fail(message) => Err(anyhow::anyhow!(*message)),
            }
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            anyhow::bail!("no display")
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().expect("lock").clone()).expect("utf8")
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn python_file(dir: &Path) -> ActiveDocument {
        let file = dir.join("app.py");
        std::fs::write(&file, "def foo():\n    pass\n").expect("write");
        ActiveDocument::open(&file, None).expect("doc")
    }

    fn rule() -> SidecarRule {
        SidecarRule::new(&["py".to_string()], "_outline.txt").expect("rule")
    }

    fn foo() -> Vec<SymbolRecord> {
        vec![SymbolRecord::new("foo", 11, 0, 2)]
    }

    #[tokio::test]
    async fn no_document_stops_before_source_and_sinks() {
        let source = FakeSource::new(Reply::Symbols(Some(foo())));
        let notifier = RecordingNotifier::default();
        let mut clipboard = MemoryClipboard::default();

        let report = Orchestrator::new(&source, &notifier)
            .run(
                None,
                Sinks {
                    clipboard: Some(&mut clipboard),
                    ..Sinks::default()
                },
            )
            .await;

        assert_eq!(report.outcome, RunOutcome::NoActiveDocument);
        assert!(!report.succeeded());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(clipboard.writes, 0);
        let notices = notifier.notices();
        assert_eq!(notices, vec![Notice::error("No active editor!")]);
    }

    #[tokio::test]
    async fn empty_result_reports_no_symbols_and_writes_nothing() {
        for reply in [Reply::Symbols(Some(Vec::new())), Reply::Symbols(None)] {
            let dir = TempDir::new().expect("tempdir");
            let doc = python_file(dir.path());
            let source = FakeSource::new(reply);
            let notifier = RecordingNotifier::default();
            let buf = SharedBuf::default();
            let mut log = OutlineLog::new(Box::new(buf.clone()));
            let mut clipboard = MemoryClipboard::default();
            let rule = rule();

            let report = Orchestrator::new(&source, &notifier)
                .expect_language("python")
                .run(
                    Some(&doc),
                    Sinks {
                        log: Some(&mut log),
                        clipboard: Some(&mut clipboard),
                        sidecar: Some(&rule),
                    },
                )
                .await;

            assert_eq!(report.outcome, RunOutcome::NoSymbols);
            assert!(report.succeeded());
            assert!(report.sinks.is_empty());
            assert_eq!(clipboard.writes, 0);
            assert!(buf.text().is_empty());
            assert!(!dir.path().join("app_outline.txt").exists());
            assert_eq!(
                notifier.notices(),
                vec![Notice::info("No symbols found in this file.")]
            );
        }
    }

    #[tokio::test]
    async fn full_run_writes_all_three_sinks() {
        let dir = TempDir::new().expect("tempdir");
        let doc = python_file(dir.path());
        let source = FakeSource::new(Reply::Symbols(Some(foo())));
        let notifier = RecordingNotifier::default();
        let buf = SharedBuf::default();
        let mut log = OutlineLog::new(Box::new(buf.clone()));
        let mut clipboard = MemoryClipboard::default();
        let rule = rule();

        let report = Orchestrator::new(&source, &notifier)
            .expect_language("python")
            .run(
                Some(&doc),
                Sinks {
                    log: Some(&mut log),
                    clipboard: Some(&mut clipboard),
                    sidecar: Some(&rule),
                },
            )
            .await;

        let expected_text = "File Outline:\n- foo (Function) [Lines 1-3]\n";
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert!(report.succeeded());
        assert_eq!(report.symbol_count, 1);
        assert_eq!(buf.text(), expected_text);

        let sidecar = dir.path().join("app_outline.txt");
        assert_eq!(std::fs::read_to_string(&sidecar).expect("sidecar"), expected_text);

        let copied: Value =
            serde_json::from_str(clipboard.contents.as_deref().expect("clipboard")).expect("json");
        assert_eq!(copied, serde_json::to_value(foo()).expect("value"));

        let messages: Vec<String> = notifier.notices().into_iter().map(|n| n.message).collect();
        assert_eq!(messages[0], "Outline printed to log.");
        assert_eq!(
            messages[1],
            "JSON outline copied to clipboard for LLM summarization."
        );
        assert!(messages[2].starts_with("Outline saved to "));
        assert!(messages[2].ends_with("app_outline.txt"));
    }

    #[tokio::test]
    async fn other_language_warns_and_continues() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("lib.rs");
        std::fs::write(&file, "fn foo() {}\n").expect("write");
        let doc = ActiveDocument::open(&file, None).expect("doc");
        let source = FakeSource::new(Reply::Symbols(Some(foo())));
        let notifier = RecordingNotifier::default();
        let rule = rule();

        let report = Orchestrator::new(&source, &notifier)
            .expect_language("python")
            .run(
                Some(&doc),
                Sinks {
                    sidecar: Some(&rule),
                    ..Sinks::default()
                },
            )
            .await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        let first = &notifier.notices()[0];
        assert_eq!(first.level, NoticeLevel::Warning);
        assert_eq!(first.message, "This is optimized for Python files.");
        assert!(dir.path().join("lib.rs_outline.txt").exists());
        assert_eq!(
            std::fs::read_to_string(&file).expect("source untouched"),
            "fn foo() {}\n"
        );
    }

    #[tokio::test]
    async fn clipboard_failure_does_not_block_other_sinks() {
        let dir = TempDir::new().expect("tempdir");
        let doc = python_file(dir.path());
        let source = FakeSource::new(Reply::Symbols(Some(foo())));
        let notifier = RecordingNotifier::default();
        let buf = SharedBuf::default();
        let mut log = OutlineLog::new(Box::new(buf.clone()));
        let mut clipboard = BrokenClipboard;
        let rule = rule();

        let report = Orchestrator::new(&source, &notifier)
            .run(
                Some(&doc),
                Sinks {
                    log: Some(&mut log),
                    clipboard: Some(&mut clipboard),
                    sidecar: Some(&rule),
                },
            )
            .await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert!(!report.succeeded());
        assert!(matches!(report.sinks[0].status, SinkStatus::Written { .. }));
        match &report.sinks[1].status {
            SinkStatus::Failed { error } => assert!(error.contains("no display")),
            other => panic!("expected clipboard failure, got {other:?}"),
        }
        assert!(matches!(report.sinks[2].status, SinkStatus::Written { .. }));
        assert!(dir.path().join("app_outline.txt").exists());
        assert!(!buf.text().is_empty());
        assert!(notifier
            .notices()
            .iter()
            .any(|n| n.level == NoticeLevel::Error && n.message.contains("clipboard")));
    }

    #[tokio::test]
    async fn sidecar_failure_is_reported_per_sink() {
        let dir = TempDir::new().expect("tempdir");
        let doc = python_file(dir.path());
        // A directory squatting on the sidecar name makes the rename fail.
        std::fs::create_dir(dir.path().join("app_outline.txt")).expect("mkdir");
        std::fs::write(dir.path().join("app_outline.txt").join("keep"), "x").expect("write");

        let source = FakeSource::new(Reply::Symbols(Some(foo())));
        let notifier = RecordingNotifier::default();
        let mut clipboard = MemoryClipboard::default();
        let rule = rule();

        let report = Orchestrator::new(&source, &notifier)
            .run(
                Some(&doc),
                Sinks {
                    clipboard: Some(&mut clipboard),
                    sidecar: Some(&rule),
                    ..Sinks::default()
                },
            )
            .await;

        assert_eq!(report.sinks[0].status, SinkStatus::Skipped);
        assert!(matches!(report.sinks[1].status, SinkStatus::Written { .. }));
        assert!(report.sinks[2].is_failure());
        assert_eq!(clipboard.writes, 1);
    }

    #[tokio::test]
    async fn source_failure_stops_before_sinks() {
        let dir = TempDir::new().expect("tempdir");
        let doc = python_file(dir.path());
        let source = FakeSource::new(Reply::Fail("server crashed"));
        let notifier = RecordingNotifier::default();
        let mut clipboard = MemoryClipboard::default();

        let report = Orchestrator::new(&source, &notifier)
            .run(
                Some(&doc),
                Sinks {
                    clipboard: Some(&mut clipboard),
                    ..Sinks::default()
                },
            )
            .await;

        assert_eq!(report.outcome, RunOutcome::SourceFailed);
        assert!(report.sinks.is_empty());
        assert_eq!(clipboard.writes, 0);
        assert!(notifier.notices()[0].message.contains("server crashed"));
    }

    #[tokio::test]
    async fn report_serializes_for_json_output() {
        let dir = TempDir::new().expect("tempdir");
        let doc = python_file(dir.path());
        let source = FakeSource::new(Reply::Symbols(Some(foo())));
        let notifier = RecordingNotifier::default();

        let report = Orchestrator::new(&source, &notifier)
            .run(Some(&doc), Sinks::default())
            .await;

        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["outcome"], "completed");
        assert_eq!(json["language_id"], "python");
        assert_eq!(json["sinks"][0]["sink"], "log");
        assert_eq!(json["sinks"][0]["status"], "skipped");
    }
}
