// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keymap_cleaner::CleanerConfig;

use crate::commands::*;
use crate::error::CliResult;

/// keymap-cleaner - find and remove keybindings that point at missing commands
#[derive(Parser, Debug)]
#[command(name = "keymap-cleaner")]
#[command(bin_name = "keymap-cleaner")]
#[command(about = "Find and remove keybindings that point at missing commands")]
#[command(
    long_about = "keymap-cleaner checks an editor keybindings.json against the commands the editor knows.\n\nEntries without a command, or whose command (after an unbind '-' prefix) is not registered, are reported and can be removed one at a time or all at once.\n\nQuick Start:\n  • keymap-cleaner check          Report problems in your keybindings\n  • keymap-cleaner fix --all      Delete flagged keybindings in place\n  • keymap-cleaner clean          Rewrite the file without invalid entries"
)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (default: <config dir>/keymap-cleaner/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON snapshot of the editor's command lists
    #[arg(long, global = true, value_name = "FILE")]
    pub commands: Option<PathBuf>,

    /// Directory holding installed extensions (repeatable)
    #[arg(long = "extensions-dir", global = true, value_name = "DIR")]
    pub extensions_dirs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview changes without writing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Fix or clean even when the editor's command lists could not be read
    #[arg(long, global = true)]
    pub force: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Report invalid keybindings
    #[command(about = "Validate a keybindings file and report invalid entries")]
    Check {
        /// Keybindings file (default: the editor's user keybindings)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Delete flagged keybindings
    #[command(about = "Delete the first flagged keybinding, or all of them with --all")]
    Fix {
        /// Keybindings file (default: the editor's user keybindings)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Keep fixing until nothing is left to fix
        #[arg(long)]
        all: bool,
    },

    /// Rewrite the file without invalid keybindings
    #[command(about = "Remove every invalid keybinding and pretty-print the file")]
    Clean {
        /// Keybindings file (default: the editor's user keybindings)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Show the known command registry
    #[command(about = "Show how many commands are known, or list them")]
    Commands {
        /// Print every command id
        #[arg(long)]
        list: bool,
    },

    /// Show the effective configuration
    #[command(about = "Print the configuration in effect")]
    Config,
}

/// Route and execute commands
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();
        let ctx = Self::context(&cli)?;

        // Initialize logging based on CLI flags and configuration
        crate::logging::init_logging(cli.verbose, cli.quiet, &ctx.config.log_level);

        Self::execute(&cli, &ctx).await
    }

    /// Load configuration and apply command-line overrides
    pub fn context(cli: &Cli) -> CliResult<CommandContext> {
        let config_path = cli.config.clone().unwrap_or_else(CleanerConfig::default_path);
        let mut config = CleanerConfig::load_from(&config_path)?;

        if let Some(commands) = &cli.commands {
            config.commands_file = Some(commands.clone());
        }
        if !cli.extensions_dirs.is_empty() {
            config.extensions_dirs = cli.extensions_dirs.clone();
        }

        Ok(CommandContext::new(config, config_path, cli.dry_run).with_force(cli.force))
    }

    /// Execute a command
    pub async fn execute(cli: &Cli, ctx: &CommandContext) -> CliResult<()> {
        // Default to checking the user keybindings
        let command = cli.command.clone().unwrap_or(Commands::Check {
            file: None,
            format: OutputFormat::Text,
        });

        match &command {
            Commands::Check { file, format } => {
                let cmd = CheckCommand::new(file.clone(), *format);
                cmd.execute(ctx).await
            }
            Commands::Fix { file, all } => {
                let cmd = FixCommand::new(file.clone(), *all);
                cmd.execute(ctx).await
            }
            Commands::Clean { file } => {
                let cmd = CleanCommand::new(file.clone());
                cmd.execute(ctx).await
            }
            Commands::Commands { list } => {
                let cmd = RegistryCommand::new(*list);
                cmd.execute(ctx).await
            }
            Commands::Config => {
                let cmd = ConfigCommand::new();
                cmd.execute(ctx).await
            }
        }
    }
}
