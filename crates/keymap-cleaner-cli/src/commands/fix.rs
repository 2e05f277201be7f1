// Apply "Delete this keybinding" quick fixes to a keybindings file

use std::path::PathBuf;

use keymap_cleaner::{DocumentEditor, PassOutcome, RegistryError};
use tracing::debug;

use super::{ensure_host_commands, load_document, Command, CommandContext};
use crate::error::{CliError, CliResult};
use crate::host::FileEditor;
use crate::output::OutputStyle;

/// Apply quick fixes one at a time
pub struct FixCommand {
    pub file: Option<PathBuf>,
    /// Keep fixing until no fixable diagnostic remains
    pub all: bool,
}

impl FixCommand {
    pub fn new(file: Option<PathBuf>, all: bool) -> Self {
        Self { file, all }
    }
}

#[async_trait::async_trait]
impl Command for FixCommand {
    async fn execute(&self, ctx: &CommandContext) -> CliResult<()> {
        let style = OutputStyle::default();
        let path = ctx.resolve_file(self.file.as_deref())?;
        let mut document = load_document(&path).await?;
        let (engine, sink) = ctx.engine(&path);
        ensure_host_commands(ctx, &engine).await?;
        let editor = FileEditor::new(&path, document.uri.clone(), document.text.clone(), ctx.dry_run);

        let mut fixed = 0usize;
        let mut budget = None;
        loop {
            if engine.did_change(&document).await == PassOutcome::Skipped {
                return Err(CliError::Registry(RegistryError::NoSources));
            }
            let actions = engine.code_actions(&document, &sink.get(&document.uri));
            // Every fix removes one entry, so the first pass bounds the work
            let limit = *budget.get_or_insert(actions.len());

            let Some(action) = actions.into_iter().next() else {
                break;
            };
            if fixed >= limit {
                break;
            }

            debug!("Applying fix for: {}", action.diagnostic.message);
            if !editor.apply_edit(&document.uri, action.edit).await {
                return Err(CliError::Internal(format!(
                    "Planned fix does not apply to {}",
                    path.display()
                )));
            }
            println!("{}", style.list_item(&format!("Deleted: {}", action.diagnostic.message)));
            document.text = editor.text();
            fixed += 1;

            if !self.all {
                break;
            }
        }

        if fixed == 0 {
            println!("{}", style.success("Nothing to fix"));
            return Ok(());
        }

        editor.save(&document.uri).await?;
        if ctx.dry_run {
            println!("{}", document.text);
            println!("{}", style.info(&format!("Dry run: {} fix(es) not written", fixed)));
        } else {
            println!(
                "{}",
                style.success(&format!("Applied {} fix(es) to {}", fixed, path.display()))
            );
        }
        Ok(())
    }
}
