// keymap-cleaner CLI library

pub mod commands;
pub mod error;
pub mod host;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
pub use host::{CommandSnapshot, FileEditor, FsCommandSource};
pub use logging::{init_logging, VerbosityLevel};
pub use router::{Cli, CommandRouter, Commands};
