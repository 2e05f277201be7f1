//! Core data models for keybinding entries and command identifiers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix marking an entry that removes a binding instead of adding one
pub const UNBIND_PREFIX: char = '-';

/// Strip the unbind prefix from a command reference.
///
/// `"-editor.action.foo"` resolves to `"editor.action.foo"`; anything else is
/// returned unchanged. Only one leading `-` is removed.
pub fn effective_command_id(command: &str) -> &str {
    command.strip_prefix(UNBIND_PREFIX).unwrap_or(command)
}

/// A single element of the user's keybindings array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeybindingEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// Properties this tool does not interpret (`args` and friends)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KeybindingEntry {
    /// Create an entry binding `key` to `command`
    pub fn new(key: impl Into<String>, command: impl Into<String>) -> Self {
        KeybindingEntry {
            key: Some(key.into()),
            command: Some(command.into()),
            ..Default::default()
        }
    }

    /// Create an entry that only names a command
    pub fn with_command(command: impl Into<String>) -> Self {
        KeybindingEntry {
            command: Some(command.into()),
            ..Default::default()
        }
    }

    /// Attach a `when` clause
    pub fn when(mut self, when: impl Into<String>) -> Self {
        self.when = Some(when.into());
        self
    }

    /// The command reference, if present and non-empty
    pub fn command_ref(&self) -> Option<&str> {
        self.command.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_command_strips_single_prefix() {
        assert_eq!(effective_command_id("-editor.foo"), "editor.foo");
        assert_eq!(effective_command_id("editor.foo"), "editor.foo");
        assert_eq!(effective_command_id("--editor.foo"), "-editor.foo");
    }

    #[test]
    fn test_empty_command_is_absent() {
        let entry = KeybindingEntry::with_command("");
        assert_eq!(entry.command_ref(), None);
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let json = r#"{"key":"ctrl+k","command":"workbench.action.tasks.runTask","args":"build"}"#;
        let entry: KeybindingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.extra.get("args"), Some(&Value::String("build".into())));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["args"], "build");
        assert!(back.get("when").is_none());
    }

    #[test]
    fn test_null_command_deserializes_as_absent() {
        let entry: KeybindingEntry = serde_json::from_str(r#"{"key":"a","command":null}"#).unwrap();
        assert_eq!(entry.command, None);
    }
}
