// CLI error types

use keymap_cleaner::{CleanerError, ConfigError, HostError, RegistryError};
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("No editor command list was read; built-in commands are unknown")]
    IncompleteRegistry,

    #[error("{0}")]
    Cleaner(#[from] CleanerError),

    #[error("{0} problem(s) found")]
    DiagnosticsFound(usize),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'keymap-cleaner --help' for usage information.",
                    message
                )
            }
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nRun 'keymap-cleaner config' to check your configuration.",
                    msg
                )
            }
            CliError::Registry(e) => {
                format!(
                    "Could not collect known commands: {}\n\nPass --commands FILE or --extensions-dir DIR.",
                    e
                )
            }
            CliError::Host(e) => {
                format!("Could not update the keybindings file: {}", e)
            }
            CliError::IncompleteRegistry => {
                "No editor command list was read, so every built-in command would look unknown and its keybindings would be deleted.\n\nPass --commands FILE with a snapshot of the editor's commands, or --force to edit anyway.".to_string()
            }
            CliError::Cleaner(CleanerError::ParseError(e)) => {
                format!(
                    "The keybindings file is not valid JSON: {}\n\nFix the syntax error before cleaning.",
                    e
                )
            }
            CliError::Cleaner(CleanerError::RegistryError(e)) => {
                format!(
                    "Could not collect known commands: {}\n\nPass --commands FILE or --extensions-dir DIR.",
                    e
                )
            }
            CliError::Cleaner(e) => e.to_string(),
            CliError::DiagnosticsFound(count) => {
                format!("{} problem(s) found", count)
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::DiagnosticsFound(_) => 2,
            _ => 1,
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;
