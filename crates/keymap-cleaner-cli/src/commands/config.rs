// Show the effective configuration

use super::{Command, CommandContext};
use crate::error::CliResult;
use crate::output::OutputStyle;

/// Print the configuration in effect for this invocation
pub struct ConfigCommand;

impl ConfigCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConfigCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self, ctx: &CommandContext) -> CliResult<()> {
        let style = OutputStyle::default();

        println!("{}", ctx.config.to_toml_string()?);

        let target = ctx
            .config
            .resolved_keybindings_path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<unresolved>".to_string());
        println!("{}", style.info(&format!("Keybindings file: {}", target)));
        println!(
            "{}",
            style.info(&format!("Config file: {}", ctx.config_path.display()))
        );
        Ok(())
    }
}
