//! Diagnostic records and the per-document diagnostic store

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::text::{LineIndex, Range, TextSpan};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What is wrong with the document or entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Entry has no `command` property, or it is empty
    MissingCommand,
    /// Entry's command is not in the registry
    UnknownCommand,
    /// Document is not a JSON array of objects
    InvalidJson,
}

impl DiagnosticKind {
    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingCommand => "missing-command",
            DiagnosticKind::UnknownCommand => "unknown-command",
            DiagnosticKind::InvalidJson => "invalid-json",
        }
    }

    /// Whether deleting the flagged entry resolves the diagnostic
    pub fn is_fixable(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::MissingCommand | DiagnosticKind::UnknownCommand
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Related diagnostic information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedInformation {
    pub span: TextSpan,
    pub message: String,
}

/// A problem found in the keybindings document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub span: TextSpan,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Label of the tool that produced the diagnostic
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<RelatedInformation>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        span: TextSpan,
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            span,
            severity,
            kind,
            message: message.into(),
            source: crate::config::DEFAULT_DIAGNOSTIC_SOURCE.to_string(),
            related_information: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_related(mut self, span: TextSpan, message: impl Into<String>) -> Self {
        self.related_information.push(RelatedInformation {
            span,
            message: message.into(),
        });
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Line/character range of the diagnostic
    pub fn range(&self, index: &LineIndex) -> Range {
        index.range(self.span)
    }
}

/// Host surface that displays diagnostics per document
pub trait DiagnosticsSink: Send + Sync {
    /// Replace every diagnostic of `uri` with `diagnostics`
    fn replace(&self, uri: &str, diagnostics: Vec<Diagnostic>);

    /// Drop every diagnostic of `uri`
    fn clear(&self, uri: &str);
}

/// In-memory diagnostics store keyed by document URI
#[derive(Debug, Default)]
pub struct DiagnosticCollection {
    entries: RwLock<HashMap<String, Vec<Diagnostic>>>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current diagnostics of `uri`
    pub fn get(&self, uri: &str) -> Vec<Diagnostic> {
        self.entries.read().get(uri).cloned().unwrap_or_default()
    }

    /// Whether a diagnostic set is published for `uri`, even an empty one
    pub fn has(&self, uri: &str) -> bool {
        self.entries.read().contains_key(uri)
    }
}

impl DiagnosticsSink for DiagnosticCollection {
    fn replace(&self, uri: &str, diagnostics: Vec<Diagnostic>) {
        self.entries.write().insert(uri.to_string(), diagnostics);
    }

    fn clear(&self, uri: &str) {
        self.entries.write().remove(uri);
    }
}
