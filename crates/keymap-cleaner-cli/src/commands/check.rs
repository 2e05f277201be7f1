// Validate a keybindings file and report its diagnostics

use std::path::PathBuf;

use clap::ValueEnum;
use keymap_cleaner::{Diagnostic, LineIndex, PassOutcome, RegistryError};
use serde::Serialize;

use super::{load_document, Command, CommandContext};
use crate::error::{CliError, CliResult};
use crate::output::{print_warning, OutputStyle};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One diagnostic as reported in JSON output (1-based positions)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub code: &'static str,
    pub severity: String,
    pub message: String,
    pub source: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

impl DiagnosticReport {
    pub fn new(diagnostic: &Diagnostic, index: &LineIndex) -> Self {
        let range = diagnostic.range(index);
        Self {
            code: diagnostic.code(),
            severity: diagnostic.severity.to_string(),
            message: diagnostic.message.clone(),
            source: diagnostic.source.clone(),
            line: range.start.line + 1,
            column: range.start.character + 1,
            end_line: range.end.line + 1,
            end_column: range.end.character + 1,
            related: diagnostic
                .related_information
                .iter()
                .map(|related| related.message.clone())
                .collect(),
        }
    }
}

/// Validate a keybindings file
pub struct CheckCommand {
    pub file: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CheckCommand {
    pub fn new(file: Option<PathBuf>, format: OutputFormat) -> Self {
        Self { file, format }
    }

    fn print_text(&self, file: &str, text: &str, diagnostics: &[Diagnostic]) {
        let style = OutputStyle::default();
        let index = LineIndex::new(text);

        for diagnostic in diagnostics {
            println!("{}", style.diagnostic(file, diagnostic, &index));
        }

        if diagnostics.is_empty() {
            println!("{}", style.success(&format!("{}: no problems found", file)));
        } else {
            println!();
            println!(
                "{}",
                style.info("Run 'keymap-cleaner fix --all' or 'keymap-cleaner clean' to remove them")
            );
        }
    }

    fn print_json(&self, text: &str, diagnostics: &[Diagnostic]) -> CliResult<()> {
        let index = LineIndex::new(text);
        let reports: Vec<DiagnosticReport> = diagnostics
            .iter()
            .map(|diagnostic| DiagnosticReport::new(diagnostic, &index))
            .collect();
        let rendered = serde_json::to_string_pretty(&reports)
            .map_err(|e| CliError::Internal(format!("Failed to render report: {}", e)))?;
        println!("{}", rendered);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Command for CheckCommand {
    async fn execute(&self, ctx: &CommandContext) -> CliResult<()> {
        let path = ctx.resolve_file(self.file.as_deref())?;
        let document = load_document(&path).await?;
        let (engine, sink) = ctx.engine(&path);

        if let Ok(registry) = engine.registry().await {
            if !registry.has_host_commands() {
                print_warning(
                    "No editor command list was read (pass --commands FILE); results are incomplete and built-in commands are reported as unknown",
                );
            }
        }

        if engine.did_open(&document).await == PassOutcome::Skipped {
            return Err(CliError::Registry(RegistryError::NoSources));
        }
        let diagnostics = sink.get(&document.uri);

        match self.format {
            OutputFormat::Text => {
                self.print_text(&path.display().to_string(), &document.text, &diagnostics)
            }
            OutputFormat::Json => self.print_json(&document.text, &diagnostics)?,
        }

        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(CliError::DiagnosticsFound(diagnostics.len()))
        }
    }
}
