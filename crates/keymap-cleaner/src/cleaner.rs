//! Bulk removal of invalid keybindings
//!
//! Works on parsed entries and regenerates the document wholesale, so any
//! formatting of the original file is not preserved.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CleanerError, Result};
use crate::models::KeybindingEntry;
use crate::parser::parse_keybindings;
use crate::registry::CommandRegistry;

/// Result of cleaning a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanOutcome {
    /// The regenerated document text
    pub text: String,
    /// Entries kept, in original order
    pub kept: usize,
    /// Entries dropped
    pub removed: usize,
}

impl CleanOutcome {
    pub fn changed(&self) -> bool {
        self.removed > 0
    }
}

/// Whether `entry` names a command the registry knows
pub fn is_valid_entry(entry: &KeybindingEntry, registry: &CommandRegistry) -> bool {
    entry
        .command_ref()
        .is_some_and(|command| registry.resolves(command))
}

/// Keep only entries whose command is present, non-empty and registered
/// (after stripping an unbind prefix). Relative order is preserved.
pub fn clean(entries: &[KeybindingEntry], registry: &CommandRegistry) -> Vec<KeybindingEntry> {
    entries
        .iter()
        .filter(|entry| is_valid_entry(entry, registry))
        .cloned()
        .collect()
}

/// Serialize entries as a pretty-printed JSON array (2-space indentation)
pub fn render(entries: &[KeybindingEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries)
        .map_err(|e| CleanerError::SerializationError(format!("Failed to render keybindings: {}", e)))
}

/// Parse `text`, drop invalid entries and render the result
pub fn clean_document(text: &str, registry: &CommandRegistry) -> Result<CleanOutcome> {
    let entries = parse_keybindings(text)?;
    let kept = clean(&entries, registry);

    let outcome = CleanOutcome {
        text: render(&kept)?,
        kept: kept.len(),
        removed: entries.len() - kept.len(),
    };
    info!(
        "Cleaned keybindings: kept {}, removed {}",
        outcome.kept, outcome.removed
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_uses_two_space_indent() {
        let rendered = render(&[KeybindingEntry::new("ctrl+k", "a")]).unwrap();
        assert_eq!(
            rendered,
            "[\n  {\n    \"key\": \"ctrl+k\",\n    \"command\": \"a\"\n  }\n]"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_clean_document_counts() {
        let registry: CommandRegistry = ["a"].into_iter().collect();
        let outcome =
            clean_document(r#"[{"command":"a"},{"command":"-b"},{}]"#, &registry).unwrap();
        assert_eq!(outcome.kept, 1);
        assert_eq!(outcome.removed, 2);
        assert!(outcome.changed());
        assert_eq!(outcome.text, "[\n  {\n    \"command\": \"a\"\n  }\n]");
    }

    #[test]
    fn test_clean_document_rejects_invalid_json() {
        assert!(matches!(
            clean_document("not valid json", &CommandRegistry::new()),
            Err(CleanerError::ParseError(_))
        ));
    }
}
