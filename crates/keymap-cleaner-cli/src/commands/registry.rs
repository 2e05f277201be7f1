// Show the commands the cleaner considers valid

use keymap_cleaner::build_registry;

use super::{Command, CommandContext};
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Print the aggregated command registry
pub struct RegistryCommand {
    pub list: bool,
}

impl RegistryCommand {
    pub fn new(list: bool) -> Self {
        Self { list }
    }
}

#[async_trait::async_trait]
impl Command for RegistryCommand {
    async fn execute(&self, ctx: &CommandContext) -> CliResult<()> {
        let style = OutputStyle::default();
        let registry = build_registry(&ctx.command_source()).await?;

        if self.list {
            for id in registry.sorted() {
                println!("{}", id);
            }
        } else {
            println!("{}", style.header("Known commands"));
            println!("{}", style.key_value("total", &registry.len().to_string()));
            let complete = if registry.has_host_commands() {
                "yes"
            } else {
                "no (extension commands only)"
            };
            println!("{}", style.key_value("editor commands", complete));
            if let Some(file) = &ctx.config.commands_file {
                println!("{}", style.key_value("snapshot", &file.display().to_string()));
            }
            for dir in &ctx.config.extensions_dirs {
                println!("{}", style.key_value("extensions", &dir.display().to_string()));
            }
        }
        Ok(())
    }
}
