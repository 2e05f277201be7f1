//! Parsing of the keybindings document into entries

use serde_json::Value;

use crate::error::ParseError;
use crate::models::KeybindingEntry;

/// Parse a keybindings document.
///
/// The document must be a JSON array whose elements are all objects. Any
/// other shape is a document-level failure; callers surface it as a single
/// `invalid-json` diagnostic.
pub fn parse_keybindings(content: &str) -> Result<Vec<KeybindingEntry>, ParseError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        other => return Err(ParseError::NotAnArray(value_kind(&other))),
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(ParseError::EntryNotObject {
                index,
                found: value_kind(&item),
            });
        }

        let entry: KeybindingEntry =
            serde_json::from_value(item).map_err(|e| ParseError::InvalidEntry {
                index,
                message: e.to_string(),
            })?;
        entries.push(entry);
    }

    Ok(entries)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
