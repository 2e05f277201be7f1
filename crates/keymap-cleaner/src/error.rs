//! Error types for keymap cleaning operations

use thiserror::Error;

/// Errors raised when a document does not have the keybindings shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}")]
    InvalidJson(String),

    #[error("expected a top-level array of keybinding objects, found {0}")]
    NotAnArray(&'static str),

    #[error("keybinding at index {index} is not an object (found {found})")]
    EntryNotObject { index: usize, found: &'static str },

    #[error("keybinding at index {index}: {message}")]
    InvalidEntry { index: usize, message: String },
}

/// Errors raised while collecting command identifiers from the host
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Command source '{source_name}' failed: {reason}")]
    SourceFailed { source_name: String, reason: String },

    #[error("Extension manifest for '{extension}' is malformed: {reason}")]
    MalformedManifest { extension: String, reason: String },

    #[error("No command source could be read")]
    NoSources,
}

/// Errors raised by the host edit surface
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Save failed for {uri}: {reason}")]
    SaveFailed { uri: String, reason: String },

    #[error("Document not available: {0}")]
    DocumentUnavailable(String),
}

/// Errors raised when applying a planned edit to document text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("Edit range {start}..{end} is out of bounds for a document of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Edit range {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors surfaced by the cleaner engine
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Registry error: {0}")]
    RegistryError(#[from] RegistryError),

    #[error("Host error: {0}")]
    HostError(#[from] HostError),

    #[error("Fix error: {0}")]
    FixError(#[from] FixError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, CleanerError>;
