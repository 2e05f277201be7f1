//! Validation and cleanup of editor keybindings files
//!
//! This crate checks a `keybindings.json` document against the commands the
//! editor actually knows:
//! - Command registry aggregated from live command lists and extension manifests
//! - Location of each keybinding object in the raw document text
//! - Diagnostics for missing, unknown and unparseable entries
//! - Quick fixes that delete a single keybinding and its separator
//! - Bulk cleaning that rewrites the file without invalid entries

pub mod cleaner;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fix;
pub mod locator;
pub mod models;
pub mod parser;
pub mod registry;
pub mod target;
pub mod text;
pub mod validator;

// Re-export public types
pub use cleaner::{clean, clean_document, render, CleanOutcome};
pub use config::CleanerConfig;
pub use diagnostics::{
    Diagnostic, DiagnosticCollection, DiagnosticKind, DiagnosticsSink, RelatedInformation,
    Severity,
};
pub use engine::{CleanResult, Document, DocumentEditor, KeymapCleaner, PassOutcome};
pub use error::{
    CleanerError, ConfigError, FixError, HostError, ParseError, RegistryError, Result,
};
pub use fix::{code_actions, plan_deletion, CodeAction, CodeActionKind};
pub use locator::{element_spans, locate, locate_entries};
pub use models::{effective_command_id, KeybindingEntry, UNBIND_PREFIX};
pub use parser::parse_keybindings;
pub use registry::{
    build_registry, CommandRegistry, CommandSource, ExtensionManifest, StaticCommandSource,
};
pub use target::{default_keybindings_path, is_target_path};
pub use text::{apply_edit, LineIndex, Position, Range, TextEdit, TextSpan};
pub use validator::{validate, validate_document, Validator};
