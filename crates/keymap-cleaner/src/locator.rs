//! Recovery of each keybinding's source span from the raw document text
//!
//! Two strategies are provided. [`element_spans`] walks the document
//! lexically and records the delimiters of every object directly inside the
//! top-level array, so entries map to spans by position; it copes with
//! entries that have no `command`, with duplicate commands, and with braces
//! inside string values. [`locate`] is the narrower search by command
//! string, used when positional mapping is not possible.

use tracing::debug;

use crate::models::KeybindingEntry;
use crate::text::TextSpan;

/// Find an entry's object span by searching for its `"command": "<value>"`
/// property.
///
/// The value is JSON-encoded before searching, so ids containing quotes or
/// backslashes match their escaped source form. From the first occurrence the
/// span extends back to the nearest `{` and forward to the nearest `}`.
/// Returns `None` for entries without a command or when either brace is
/// missing.
pub fn locate(text: &str, entry: &KeybindingEntry) -> Option<TextSpan> {
    let command = entry.command_ref()?;
    let needle = command_needle(command);

    let at = text.find(&needle)?;
    let start = text[..at].rfind('{')?;
    let after = at + needle.len();
    let close = text[after..].find('}')?;

    Some(TextSpan::new(start, after + close + 1))
}

fn command_needle(command: &str) -> String {
    let quoted = serde_json::to_string(command).unwrap_or_else(|_| format!("\"{}\"", command));
    format!("\"command\": {}", quoted)
}

/// Spans of every object element of the top-level array, in document order.
///
/// Only delimiters outside string literals count. Objects nested deeper than
/// the array's direct children (an `args` payload, say) stay inside their
/// parent's span.
pub fn element_spans(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut element_start = None;

    for (i, byte) in text.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                if depth == 1 && byte == b'{' {
                    element_start = Some(i);
                }
                depth += 1;
            }
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 1 && byte == b'}' {
                    if let Some(start) = element_start.take() {
                        spans.push(TextSpan::new(start, i + 1));
                    }
                }
            }
            _ => {}
        }
    }

    spans
}

/// Spans for `entries`, parsed from `text`, in entry order.
///
/// Positional mapping is used when the lexical walk finds exactly one object
/// per entry; otherwise each entry falls back to [`locate`] and may come back
/// as `None`.
pub fn locate_entries(text: &str, entries: &[KeybindingEntry]) -> Vec<Option<TextSpan>> {
    let spans = element_spans(text);
    if spans.len() == entries.len() {
        return spans.into_iter().map(Some).collect();
    }

    debug!(
        "Found {} object spans for {} entries, falling back to command search",
        spans.len(),
        entries.len()
    );
    entries.iter().map(|entry| locate(text, entry)).collect()
}
