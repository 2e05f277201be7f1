//! Keymap cleaner engine: the event-driven boundary between a host editor
//! and the validation core
//!
//! The engine decides whether a document is the keybindings file, runs
//! validation passes on open/change events, publishes diagnostics to the
//! host sink, offers quick fixes and performs the bulk clean command.
//!
//! Passes for the same document are serialized by generation: each pass
//! takes a new generation number before it awaits the host, and publishes
//! only if no newer pass started meanwhile.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::cleaner::{clean_document, CleanOutcome};
use crate::config::CleanerConfig;
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::{HostError, Result};
use crate::fix::{code_actions, CodeAction};
use crate::registry::{build_registry, CommandRegistry, CommandSource};
use crate::target::is_target_path;
use crate::text::{TextEdit, TextSpan};
use crate::validator::Validator;

/// A document as seen by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub uri: String,
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    /// Document backed by a file path, with a `file://` URI
    pub fn from_path(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        Document {
            uri: format!("file://{}", path.to_string_lossy().replace('\\', "/")),
            path,
            text: text.into(),
        }
    }
}

/// Host interface for editing and saving documents
#[async_trait]
pub trait DocumentEditor: Send + Sync {
    /// Propose a replacement; returns whether the host accepted it
    async fn apply_edit(&self, uri: &str, edit: TextEdit) -> bool;

    /// Persist the document
    async fn save(&self, uri: &str) -> std::result::Result<(), HostError>;
}

/// What a validation pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Document is not the keybindings file; its diagnostics were cleared
    NotTarget,
    /// Diagnostics were published
    Published(usize),
    /// A newer pass for the same document started first
    Superseded,
    /// The registry could not be built; previous diagnostics were kept
    Skipped,
}

/// What the clean command did
#[derive(Debug, Clone, PartialEq)]
pub enum CleanResult {
    /// No active document, or it is not the keybindings file
    NotApplicable,
    /// The host rejected the replacement; nothing was saved
    Rejected,
    /// The document was replaced, saved and re-validated
    Cleaned(CleanOutcome),
}

/// Main engine combining registry aggregation, validation and fixes
pub struct KeymapCleaner {
    config: CleanerConfig,
    target: Option<PathBuf>,
    commands: Arc<dyn CommandSource>,
    sink: Arc<dyn DiagnosticsSink>,
    validator: Validator,
    generations: Mutex<HashMap<String, u64>>,
}

impl KeymapCleaner {
    /// Create an engine targeting the keybindings file derived from `config`
    pub fn new(
        config: CleanerConfig,
        commands: Arc<dyn CommandSource>,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let target = config.resolved_keybindings_path();
        if target.is_none() {
            warn!("No keybindings path could be resolved; every document will be ignored");
        }
        let validator = Validator::new(config.diagnostic_source.clone());

        KeymapCleaner {
            config,
            target,
            commands,
            sink,
            validator,
            generations: Mutex::new(HashMap::new()),
        }
    }

    /// Override the target file
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    /// Whether `document` is the keybindings file
    pub fn is_target(&self, document: &Document) -> bool {
        self.target
            .as_deref()
            .is_some_and(|target| is_target_path(&document.path, target))
    }

    /// Aggregate a fresh registry from the host
    pub async fn registry(&self) -> Result<CommandRegistry> {
        Ok(build_registry(self.commands.as_ref()).await?)
    }

    /// Handle a document-opened event
    pub async fn did_open(&self, document: &Document) -> PassOutcome {
        self.update_diagnostics(document).await
    }

    /// Handle a document-changed event
    pub async fn did_change(&self, document: &Document) -> PassOutcome {
        self.update_diagnostics(document).await
    }

    /// Handle a document-closed event
    pub fn did_close(&self, uri: &str) {
        self.generations.lock().remove(uri);
        self.sink.clear(uri);
    }

    /// Run one validation pass and publish its diagnostics
    pub async fn update_diagnostics(&self, document: &Document) -> PassOutcome {
        if !self.is_target(document) {
            self.sink.clear(&document.uri);
            return PassOutcome::NotTarget;
        }

        let generation = self.begin_pass(&document.uri);

        let registry = match self.registry().await {
            Ok(registry) => registry,
            Err(e) => {
                warn!("Skipping validation of {}: {}", document.uri, e);
                return PassOutcome::Skipped;
            }
        };

        let diagnostics = self.validator.validate_document(&document.text, &registry);

        if !self.is_current(&document.uri, generation) {
            debug!(
                "Validation pass {} for {} superseded, dropping results",
                generation, document.uri
            );
            return PassOutcome::Superseded;
        }

        let count = diagnostics.len();
        debug!("Publishing {} diagnostics for {}", count, document.uri);
        self.sink.replace(&document.uri, diagnostics);
        PassOutcome::Published(count)
    }

    /// Quick fixes for the given diagnostics of `document`
    pub fn code_actions(&self, document: &Document, diagnostics: &[Diagnostic]) -> Vec<CodeAction> {
        if !self.is_target(document) {
            return Vec::new();
        }
        code_actions(&document.text, &document.uri, diagnostics)
    }

    /// Bulk-clean the active document.
    ///
    /// The whole document is replaced with the cleaned rendering. On success
    /// the document is saved and re-validated; a rejected edit stops there.
    pub async fn clean_active(
        &self,
        active: Option<&Document>,
        editor: &dyn DocumentEditor,
    ) -> Result<CleanResult> {
        let Some(document) = active else {
            return Ok(CleanResult::NotApplicable);
        };
        if !self.is_target(document) {
            debug!("Clean requested for non-keybindings document {}", document.uri);
            return Ok(CleanResult::NotApplicable);
        }

        let registry = self.registry().await?;
        let outcome = clean_document(&document.text, &registry)?;

        let edit = TextEdit::replace(TextSpan::whole(&document.text), outcome.text.clone());
        if !editor.apply_edit(&document.uri, edit).await {
            warn!("Host rejected the cleaned keybindings for {}", document.uri);
            return Ok(CleanResult::Rejected);
        }

        editor.save(&document.uri).await?;
        info!(
            "Removed {} invalid keybindings from {}",
            outcome.removed, document.uri
        );

        let cleaned = Document {
            text: outcome.text.clone(),
            ..document.clone()
        };
        self.update_diagnostics(&cleaned).await;

        Ok(CleanResult::Cleaned(outcome))
    }

    fn begin_pass(&self, uri: &str) -> u64 {
        let mut generations = self.generations.lock();
        let generation = generations.entry(uri.to_string()).or_insert(0);
        *generation += 1;
        *generation
    }

    fn is_current(&self, uri: &str, generation: u64) -> bool {
        self.generations.lock().get(uri).copied() == Some(generation)
    }
}
