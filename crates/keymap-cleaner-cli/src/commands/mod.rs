// Command handlers for the keymap-cleaner CLI

pub mod check;
pub mod clean;
pub mod config;
pub mod fix;
pub mod registry;

pub use check::{CheckCommand, OutputFormat};
pub use clean::CleanCommand;
pub use config::ConfigCommand;
pub use fix::FixCommand;
pub use registry::RegistryCommand;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use keymap_cleaner::{CleanerConfig, DiagnosticCollection, Document, KeymapCleaner};

use tracing::warn;

use crate::error::{CliError, CliResult};
use crate::host::FsCommandSource;
use crate::output::print_warning;

/// Settings shared by every command of one invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: CleanerConfig,
    /// Path the configuration was loaded from
    pub config_path: PathBuf,
    pub dry_run: bool,
    /// Edit even when the editor's own command lists are missing
    pub force: bool,
}

impl CommandContext {
    pub fn new(config: CleanerConfig, config_path: PathBuf, dry_run: bool) -> Self {
        Self {
            config,
            config_path,
            dry_run,
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Command source over the configured snapshot and extension directories
    pub fn command_source(&self) -> FsCommandSource {
        FsCommandSource::new(
            self.config.commands_file.clone(),
            self.config.extensions_dirs.clone(),
        )
    }

    /// The file to operate on: `file` when given, else the configured target
    pub fn resolve_file(&self, file: Option<&Path>) -> CliResult<PathBuf> {
        file.map(Path::to_path_buf)
            .or_else(|| self.config.resolved_keybindings_path())
            .ok_or_else(|| {
                CliError::Config(
                    "Could not determine the keybindings file; pass FILE or set keybindings_path"
                        .to_string(),
                )
            })
    }

    /// Engine targeting `target`, publishing into a fresh collection
    pub fn engine(&self, target: &Path) -> (KeymapCleaner, Arc<DiagnosticCollection>) {
        let sink = Arc::new(DiagnosticCollection::new());
        let engine = KeymapCleaner::new(
            self.config.clone(),
            Arc::new(self.command_source()),
            sink.clone(),
        )
        .with_target(target);
        (engine, sink)
    }
}

/// Refuse to edit unless the engine's registry holds a host command list.
///
/// Without one every built-in command looks unknown, so fixing or cleaning
/// would delete valid keybindings. `--force` downgrades this to a warning.
pub async fn ensure_host_commands(ctx: &CommandContext, engine: &KeymapCleaner) -> CliResult<()> {
    let registry = engine.registry().await?;
    if registry.has_host_commands() {
        return Ok(());
    }
    if !ctx.force {
        return Err(CliError::IncompleteRegistry);
    }
    warn!("Editing without a host command list ({} known commands)", registry.len());
    print_warning("No editor command list was read; bindings to built-in commands will be removed");
    Ok(())
}

/// Read `path` as a document
pub async fn load_document(path: &Path) -> CliResult<Document> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        CliError::InvalidArgument {
            message: format!("Cannot read {}: {}", path.display(), e),
        }
    })?;
    Ok(Document::from_path(path, text))
}

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self, ctx: &CommandContext) -> CliResult<()>;
}
