//! Classification of keybinding entries against the command registry

use tracing::debug;

use crate::config::DEFAULT_DIAGNOSTIC_SOURCE;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::error::ParseError;
use crate::locator::locate_entries;
use crate::models::{effective_command_id, KeybindingEntry};
use crate::parser::parse_keybindings;
use crate::registry::CommandRegistry;
use crate::text::TextSpan;

/// Message of a `missing-command` diagnostic
pub const MISSING_COMMAND_MESSAGE: &str = "Missing \"command\" property in keybinding";

/// Validates keybinding documents and stamps diagnostics with a source label
#[derive(Debug, Clone)]
pub struct Validator {
    source: String,
}

impl Validator {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Validate already-parsed `entries` of `text`.
    ///
    /// Diagnostics come out in entry order. Entries whose span cannot be
    /// recovered are skipped.
    pub fn validate(
        &self,
        text: &str,
        entries: &[KeybindingEntry],
        registry: &CommandRegistry,
    ) -> Vec<Diagnostic> {
        let spans = locate_entries(text, entries);

        entries
            .iter()
            .zip(spans)
            .enumerate()
            .filter_map(|(index, (entry, span))| {
                let Some(span) = span else {
                    debug!("Could not locate keybinding {} in document, skipping", index);
                    return None;
                };
                self.check_entry(entry, span, registry)
            })
            .collect()
    }

    /// Parse and validate a whole document.
    ///
    /// A document that is not an array of objects yields exactly one
    /// `invalid-json` diagnostic spanning the entire text.
    pub fn validate_document(&self, text: &str, registry: &CommandRegistry) -> Vec<Diagnostic> {
        match parse_keybindings(text) {
            Ok(entries) => self.validate(text, &entries, registry),
            Err(e) => vec![self.invalid_json(text, &e)],
        }
    }

    fn check_entry(
        &self,
        entry: &KeybindingEntry,
        span: TextSpan,
        registry: &CommandRegistry,
    ) -> Option<Diagnostic> {
        let Some(command) = entry.command_ref() else {
            return Some(
                Diagnostic::new(
                    span,
                    Severity::Error,
                    DiagnosticKind::MissingCommand,
                    MISSING_COMMAND_MESSAGE,
                )
                .with_source(&self.source),
            );
        };

        let command_id = effective_command_id(command);
        if registry.contains(command_id) {
            return None;
        }

        Some(
            Diagnostic::new(
                span,
                Severity::Warning,
                DiagnosticKind::UnknownCommand,
                format!(
                    "Unknown command: \"{}\". This keybinding will not work.",
                    command
                ),
            )
            .with_source(&self.source)
            .with_related(
                span,
                format!("Command \"{}\" is not registered", command_id),
            ),
        )
    }

    fn invalid_json(&self, text: &str, error: &ParseError) -> Diagnostic {
        Diagnostic::new(
            TextSpan::whole(text),
            Severity::Error,
            DiagnosticKind::InvalidJson,
            format!("Invalid JSON: {}", error),
        )
        .with_source(&self.source)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGNOSTIC_SOURCE)
    }
}

/// Validate parsed entries with the default source label
pub fn validate(
    text: &str,
    entries: &[KeybindingEntry],
    registry: &CommandRegistry,
) -> Vec<Diagnostic> {
    Validator::default().validate(text, entries, registry)
}

/// Parse and validate a document with the default source label
pub fn validate_document(text: &str, registry: &CommandRegistry) -> Vec<Diagnostic> {
    Validator::default().validate_document(text, registry)
}
