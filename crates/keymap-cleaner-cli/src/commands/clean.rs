// Remove every invalid keybinding and rewrite the file

use std::path::PathBuf;

use keymap_cleaner::CleanResult;

use super::{ensure_host_commands, load_document, Command, CommandContext};
use crate::error::{CliError, CliResult};
use crate::host::FileEditor;
use crate::output::OutputStyle;

/// Bulk clean a keybindings file
pub struct CleanCommand {
    pub file: Option<PathBuf>,
}

impl CleanCommand {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }
}

#[async_trait::async_trait]
impl Command for CleanCommand {
    async fn execute(&self, ctx: &CommandContext) -> CliResult<()> {
        let style = OutputStyle::default();
        let path = ctx.resolve_file(self.file.as_deref())?;
        let document = load_document(&path).await?;
        let (engine, _) = ctx.engine(&path);
        ensure_host_commands(ctx, &engine).await?;
        let editor = FileEditor::new(&path, document.uri.clone(), document.text.clone(), ctx.dry_run);

        match engine.clean_active(Some(&document), &editor).await? {
            CleanResult::Cleaned(outcome) => {
                if ctx.dry_run {
                    println!("{}", outcome.text);
                }
                let summary = format!(
                    "Removed {} invalid keybinding(s), kept {}",
                    outcome.removed, outcome.kept
                );
                if ctx.dry_run {
                    println!("{}", style.info(&format!("Dry run: {}", summary)));
                } else if outcome.changed() {
                    println!("{}", style.success(&format!("{} in {}", summary, path.display())));
                } else {
                    println!("{}", style.success("No invalid keybindings found"));
                }
                Ok(())
            }
            CleanResult::Rejected => Err(CliError::Internal(format!(
                "Cleaned text could not be applied to {}",
                path.display()
            ))),
            CleanResult::NotApplicable => {
                println!(
                    "{}",
                    style.warning(&format!("{} is not a keybindings file", path.display()))
                );
                Ok(())
            }
        }
    }
}
