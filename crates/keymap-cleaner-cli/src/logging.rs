// Logging and verbosity control

use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::Level;

/// Global verbosity level
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Quiet mode - errors only
    Quiet = 0,
    /// Normal mode - standard output
    Normal = 1,
    /// Verbose mode - detailed output
    Verbose = 2,
}

impl VerbosityLevel {
    /// Get the current verbosity level
    pub fn current() -> Self {
        match VERBOSITY.load(Ordering::Relaxed) {
            0 => VerbosityLevel::Quiet,
            1 => VerbosityLevel::Normal,
            _ => VerbosityLevel::Verbose,
        }
    }

    /// Set the verbosity level
    pub fn set(level: Self) {
        VERBOSITY.store(level as u8, Ordering::Relaxed);
    }

    /// Check if we should output at this level
    pub fn should_output(&self) -> bool {
        self <= &Self::current()
    }

    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            VerbosityLevel::Quiet
        } else if verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Tracing level for a verbosity and the configured `log_level`
pub fn tracing_level(verbosity: VerbosityLevel, configured: &str) -> Level {
    match verbosity {
        VerbosityLevel::Quiet => Level::ERROR,
        VerbosityLevel::Verbose => Level::DEBUG,
        VerbosityLevel::Normal => Level::from_str(configured).unwrap_or(Level::INFO),
    }
}

/// Initialize logging based on CLI flags and configuration.
///
/// Installs a `tracing` subscriber writing to stderr. Target, file and line
/// annotations are shown in verbose mode only.
pub fn init_logging(verbose: bool, quiet: bool, configured: &str) -> VerbosityLevel {
    use tracing_subscriber::fmt;

    let verbosity = VerbosityLevel::from_flags(verbose, quiet);
    VerbosityLevel::set(verbosity);

    let detailed = verbosity == VerbosityLevel::Verbose;
    // A subscriber may already be installed (tests); keep it
    let _ = fmt()
        .with_max_level(tracing_level(verbosity, configured))
        .with_target(detailed)
        .with_file(detailed)
        .with_line_number(detailed)
        .with_writer(std::io::stderr)
        .try_init();

    verbosity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_to_verbosity() {
        assert_eq!(VerbosityLevel::from_flags(false, true), VerbosityLevel::Quiet);
        assert_eq!(VerbosityLevel::from_flags(true, false), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::from_flags(false, false), VerbosityLevel::Normal);
        assert_eq!(VerbosityLevel::from_flags(true, true), VerbosityLevel::Quiet);
    }

    #[test]
    fn test_configured_level_applies_in_normal_mode() {
        assert_eq!(tracing_level(VerbosityLevel::Normal, "warn"), Level::WARN);
        assert_eq!(tracing_level(VerbosityLevel::Normal, "DEBUG"), Level::DEBUG);
        assert_eq!(tracing_level(VerbosityLevel::Normal, "nonsense"), Level::INFO);
    }

    #[test]
    fn test_flags_override_configured_level() {
        assert_eq!(tracing_level(VerbosityLevel::Quiet, "debug"), Level::ERROR);
        assert_eq!(tracing_level(VerbosityLevel::Verbose, "error"), Level::DEBUG);
    }
}
